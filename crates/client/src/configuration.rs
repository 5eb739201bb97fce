//! Detector configuration routes: `/v1/netspot` and `/v1/netspot/{id}`.

use netspot_control_core::{NetspotConfig, ValidationError, wire};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::pipeline::{Endpoint, Expect};
use crate::{Client, Error};

const CREATED: &[(StatusCode, Expect)] = &[(StatusCode::CREATED, Expect::Empty)];

const FOUND: &[(StatusCode, Expect)] = &[
    (StatusCode::OK, Expect::Body),
    (StatusCode::NOT_FOUND, Expect::NotFound),
];

const UPDATED: &[(StatusCode, Expect)] = &[
    (StatusCode::OK, Expect::Empty),
    (StatusCode::NOT_FOUND, Expect::NotFound),
];

/// Register a new detector configuration.
#[derive(Debug, Clone, Copy)]
pub struct AddNetspot<'a> {
    pub config: &'a NetspotConfig,
}

impl Endpoint for AddNetspot<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/netspot".to_string()
    }

    fn body(&self) -> Result<Option<Value>, ValidationError> {
        wire::to_value(self.config).map(Some)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        CREATED
    }
}

/// Fetch one detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetNetspot {
    pub id: i32,
}

impl GetNetspot {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

impl Endpoint for GetNetspot {
    type Output = NetspotConfig;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/netspot/{}", self.id)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        FOUND
    }
}

/// Replace a detector configuration.
#[derive(Debug, Clone, Copy)]
pub struct PutNetspot<'a> {
    pub id: i32,
    pub config: &'a NetspotConfig,
}

impl Endpoint for PutNetspot<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/netspot/{}", self.id)
    }

    fn body(&self) -> Result<Option<Value>, ValidationError> {
        wire::to_value(self.config).map(Some)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        UPDATED
    }
}

/// Remove a detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteNetspot {
    pub id: i32,
}

impl Endpoint for DeleteNetspot {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("/netspot/{}", self.id)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        UPDATED
    }
}

impl Client {
    /// Register a new detector configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), netspot_control_client::Error> {
    /// use netspot_control_client::Client;
    /// use netspot_control_core::{MinerConfig, NetspotConfig, SpotConfig};
    ///
    /// let client = Client::new("http://127.0.0.1:11000");
    /// let config = NetspotConfig::new(MinerConfig::new("lan").with_device("eth0"))
    ///     .with_spot(SpotConfig::default());
    /// client.add_netspot(&config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_netspot(&self, config: &NetspotConfig) -> Result<Option<()>, Error> {
        self.send(&AddNetspot { config }).await
    }

    /// Fetch a detector configuration. `None` if the id is unknown.
    pub async fn get_netspot(&self, id: i32) -> Result<Option<NetspotConfig>, Error> {
        self.send(&GetNetspot::new(id)).await
    }

    /// Replace a detector configuration. `None` if the id is unknown.
    pub async fn put_netspot(&self, id: i32, config: &NetspotConfig) -> Result<Option<()>, Error> {
        self.send(&PutNetspot { id, config }).await
    }

    /// Remove a detector configuration. `None` if the id is unknown.
    pub async fn delete_netspot(&self, id: i32) -> Result<Option<()>, Error> {
        self.send(&DeleteNetspot { id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netspot_control_core::MinerConfig;

    #[test]
    fn routes() {
        let config = NetspotConfig::new(MinerConfig::new("lan"));
        assert_eq!(AddNetspot { config: &config }.path(), "/netspot");
        assert_eq!(GetNetspot::new(42).path(), "/netspot/42");
        assert_eq!(PutNetspot { id: 7, config: &config }.method(), Method::PUT);
        assert_eq!(DeleteNetspot { id: -1 }.path(), "/netspot/-1");
    }

    #[test]
    fn body_is_wire_encoding() {
        let config = NetspotConfig::new(MinerConfig::new("lan"));
        let body = AddNetspot { config: &config }.body().unwrap().unwrap();
        assert_eq!(body, serde_json::json!({"configuration": {"name": "lan"}}));
        assert!(GetNetspot::new(1).body().unwrap().is_none());
    }
}
