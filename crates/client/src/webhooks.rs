//! Webhook subscription routes.

use netspot_control_core::{ValidationError, Webhook, Webhooks, wire};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::pipeline::{Endpoint, Expect};
use crate::{Client, Error};

const LISTED: &[(StatusCode, Expect)] = &[(StatusCode::OK, Expect::Body)];
const CREATED: &[(StatusCode, Expect)] = &[(StatusCode::CREATED, Expect::Empty)];
const FOUND: &[(StatusCode, Expect)] = &[
    (StatusCode::OK, Expect::Body),
    (StatusCode::NOT_FOUND, Expect::NotFound),
];
const UPDATED: &[(StatusCode, Expect)] = &[(StatusCode::OK, Expect::Empty)];

fn webhook_path(id: i32) -> String {
    format!("/netspots/webhook/{id}")
}

/// Every registered webhook, keyed by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListWebhooks;

impl Endpoint for ListWebhooks {
    type Output = Webhooks;

    fn method(&self) -> Method {
        Method::GET
    }

    // The service registers the listing under the singular prefix.
    fn path(&self) -> String {
        "/netspot/webhooks".to_string()
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        LISTED
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AddWebhook<'a> {
    pub webhook: &'a Webhook,
}

impl Endpoint for AddWebhook<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/netspots/webhook".to_string()
    }

    fn body(&self) -> Result<Option<Value>, ValidationError> {
        wire::to_value(self.webhook).map(Some)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        CREATED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetWebhook {
    pub id: i32,
}

impl Endpoint for GetWebhook {
    type Output = Webhook;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        webhook_path(self.id)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        FOUND
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PutWebhook<'a> {
    pub id: i32,
    pub webhook: &'a Webhook,
}

impl Endpoint for PutWebhook<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        webhook_path(self.id)
    }

    fn body(&self) -> Result<Option<Value>, ValidationError> {
        wire::to_value(self.webhook).map(Some)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        UPDATED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteWebhook {
    pub id: i32,
}

impl Endpoint for DeleteWebhook {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        webhook_path(self.id)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        UPDATED
    }
}

impl Client {
    pub async fn list_webhooks(&self) -> Result<Option<Webhooks>, Error> {
        self.send(&ListWebhooks).await
    }

    /// Register a webhook.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), netspot_control_client::Error> {
    /// use netspot_control_client::Client;
    /// use netspot_control_core::{Webhook, WebhookStatsType};
    ///
    /// let client = Client::new("http://127.0.0.1:11000");
    /// let hook = Webhook::new("ops", "http://hooks.local/netspot")
    ///     .with_header("X-Token", "abc")
    ///     .with_stats_type(WebhookStatsType::Alarms);
    /// client.add_webhook(&hook).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_webhook(&self, webhook: &Webhook) -> Result<Option<()>, Error> {
        self.send(&AddWebhook { webhook }).await
    }

    /// Fetch a webhook. `None` if the id is unknown.
    pub async fn get_webhook(&self, id: i32) -> Result<Option<Webhook>, Error> {
        self.send(&GetWebhook { id }).await
    }

    pub async fn put_webhook(&self, id: i32, webhook: &Webhook) -> Result<Option<()>, Error> {
        self.send(&PutWebhook { id, webhook }).await
    }

    pub async fn delete_webhook(&self, id: i32) -> Result<Option<()>, Error> {
        self.send(&DeleteWebhook { id }).await
    }
}
