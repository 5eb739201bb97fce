//! Alarm pipeline self-test.

use netspot_control_core::{TestAlarmMessage, ValidationError, wire};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::pipeline::{Endpoint, Expect};
use crate::{Client, Error};

const ACCEPTED: &[(StatusCode, Expect)] = &[(StatusCode::OK, Expect::Empty)];

/// Ask the service to emit a synthetic alarm through its exporters.
#[derive(Debug, Clone, Copy)]
pub struct SendTestAlarm<'a> {
    pub message: &'a TestAlarmMessage,
}

impl Endpoint for SendTestAlarm<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/netspots/test/alarm".to_string()
    }

    fn body(&self) -> Result<Option<Value>, ValidationError> {
        wire::to_value(self.message).map(Some)
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        ACCEPTED
    }

    // Any 2xx acknowledges the alarm.
    fn expect(&self, status: StatusCode) -> Option<Expect> {
        status.is_success().then_some(Expect::Empty)
    }
}

impl Client {
    pub async fn send_test_alarm(&self, message: &TestAlarmMessage) -> Result<Option<()>, Error> {
        self.send(&SendTestAlarm { message }).await
    }
}
