//! Host network inspection.

use reqwest::{Method, StatusCode};

use crate::pipeline::{Endpoint, Expect};
use crate::{Client, Error};

const LISTED: &[(StatusCode, Expect)] = &[(StatusCode::OK, Expect::Body)];

/// Capture interfaces available on the service host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListInterfaces;

impl Endpoint for ListInterfaces {
    type Output = Vec<String>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/network/interfaces".to_string()
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        LISTED
    }
}

impl Client {
    pub async fn interfaces(&self) -> Result<Option<Vec<String>>, Error> {
        self.send(&ListInterfaces).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route() {
        assert_eq!(ListInterfaces.method(), Method::GET);
        assert_eq!(ListInterfaces.path(), "/network/interfaces");
        assert!(ListInterfaces.query().is_empty());
        assert!(ListInterfaces.body().unwrap().is_none());
        assert_eq!(ListInterfaces.expect(StatusCode::OK), Some(Expect::Body));
        assert_eq!(ListInterfaces.expect(StatusCode::NOT_FOUND), None);
    }
}
