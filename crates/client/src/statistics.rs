//! Alarm and data message history.

use chrono::{DateTime, Utc};
use netspot_control_core::{AlarmMessage, DataMessage};
use reqwest::{Method, StatusCode};

use crate::pipeline::{Endpoint, Expect};
use crate::{Client, Error};

const LISTED: &[(StatusCode, Expect)] = &[(StatusCode::OK, Expect::Body)];

/// Window of messages to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageQuery {
    /// Only messages after this time, in nanoseconds since the Unix epoch.
    /// Unset means since the detector started.
    pub time: Option<i64>,
    /// Maximum number of messages.
    pub last: Option<i32>,
}

impl MessageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only messages after `since`.
    ///
    /// Times beyond the nanosecond range (around year 2262) are left unset.
    #[must_use]
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.time = since.timestamp_nanos_opt();
        self
    }

    #[must_use]
    pub fn with_time(mut self, nanos: i64) -> Self {
        self.time = Some(nanos);
        self
    }

    #[must_use]
    pub fn with_last(mut self, last: i32) -> Self {
        self.last = Some(last);
        self
    }

    fn pairs(self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(time) = self.time {
            pairs.push(("time", time.to_string()));
        }
        if let Some(last) = self.last {
            pairs.push(("last", last.to_string()));
        }
        pairs
    }
}

/// Recent alarms from every detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetAlarms {
    pub query: MessageQuery,
}

impl Endpoint for GetAlarms {
    type Output = Vec<AlarmMessage>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/netspots/alarms".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.query.pairs()
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        LISTED
    }
}

/// Recent data samples from every detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetData {
    pub query: MessageQuery,
}

impl Endpoint for GetData {
    type Output = Vec<DataMessage>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/netspots/data".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.query.pairs()
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        LISTED
    }
}

impl Client {
    /// Fetch recent alarms.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), netspot_control_client::Error> {
    /// use netspot_control_client::Client;
    /// use netspot_control_client::statistics::MessageQuery;
    ///
    /// let client = Client::new("http://127.0.0.1:11000");
    /// let since = chrono::Utc::now() - chrono::Duration::minutes(5);
    /// for alarm in client.alarms(MessageQuery::new().since(since)).await?.unwrap_or_default() {
    ///     println!("{} {} {}", alarm.timestamp(), alarm.stat, alarm.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn alarms(&self, query: MessageQuery) -> Result<Option<Vec<AlarmMessage>>, Error> {
        self.send(&GetAlarms { query }).await
    }

    /// Fetch recent data samples.
    pub async fn data(&self, query: MessageQuery) -> Result<Option<Vec<DataMessage>>, Error> {
        self.send(&GetData { query }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_parameters_are_omitted() {
        assert!(GetAlarms::default().query().is_empty());

        let query = MessageQuery::new().with_last(10);
        assert_eq!(GetData { query }.query(), vec![("last", "10".to_string())]);
    }

    #[test]
    fn since_converts_to_nanoseconds() {
        let since = DateTime::from_timestamp(1_700_000_000, 5).unwrap();
        let query = MessageQuery::new().since(since).with_last(1);
        assert_eq!(query.time, Some(1_700_000_000_000_000_005));
        assert_eq!(
            GetAlarms { query }.query(),
            vec![
                ("time", "1700000000000000005".to_string()),
                ("last", "1".to_string())
            ]
        );
    }
}
