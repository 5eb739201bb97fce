//! Detector lifecycle routes.
//!
//! Every control action exists per detector (`/v1/netspot/{id}/...`) and for
//! all detectors at once (`/v1/netspots/...`). Both report the resulting
//! [`Status`].

use netspot_control_core::Status;
use reqwest::{Method, StatusCode};

use crate::pipeline::{Endpoint, Expect};
use crate::{Client, Error};

const ONE: &[(StatusCode, Expect)] = &[
    (StatusCode::OK, Expect::Body),
    (StatusCode::NOT_FOUND, Expect::NotFound),
];

const ALL: &[(StatusCode, Expect)] = &[(StatusCode::OK, Expect::Body)];

/// Lifecycle action applied to detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Read the current state only.
    Status,
    Start,
    Stop,
    Restart,
}

impl Control {
    fn per_detector_suffix(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

/// Apply `control` to one detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlNetspot {
    pub id: i32,
    pub control: Control,
}

impl Endpoint for ControlNetspot {
    type Output = Status;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/netspot/{}/{}", self.id, self.control.per_detector_suffix())
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        ONE
    }
}

/// Apply `control` to every detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAll {
    pub control: Control,
}

impl Endpoint for ControlAll {
    type Output = Vec<Status>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        match self.control {
            Control::Status => "/netspots".to_string(),
            other => format!("/netspots/{}", other.per_detector_suffix()),
        }
    }

    fn responses(&self) -> &'static [(StatusCode, Expect)] {
        ALL
    }
}

impl Client {
    /// State of one detector. `None` if the id is unknown.
    pub async fn status(&self, id: i32) -> Result<Option<Status>, Error> {
        self.send(&ControlNetspot {
            id,
            control: Control::Status,
        })
        .await
    }

    pub async fn start(&self, id: i32) -> Result<Option<Status>, Error> {
        self.send(&ControlNetspot {
            id,
            control: Control::Start,
        })
        .await
    }

    pub async fn stop(&self, id: i32) -> Result<Option<Status>, Error> {
        self.send(&ControlNetspot {
            id,
            control: Control::Stop,
        })
        .await
    }

    pub async fn restart(&self, id: i32) -> Result<Option<Status>, Error> {
        self.send(&ControlNetspot {
            id,
            control: Control::Restart,
        })
        .await
    }

    /// State of every detector.
    pub async fn status_all(&self) -> Result<Option<Vec<Status>>, Error> {
        self.send(&ControlAll {
            control: Control::Status,
        })
        .await
    }

    pub async fn start_all(&self) -> Result<Option<Vec<Status>>, Error> {
        self.send(&ControlAll {
            control: Control::Start,
        })
        .await
    }

    pub async fn stop_all(&self) -> Result<Option<Vec<Status>>, Error> {
        self.send(&ControlAll {
            control: Control::Stop,
        })
        .await
    }

    pub async fn restart_all(&self) -> Result<Option<Vec<Status>>, Error> {
        self.send(&ControlAll {
            control: Control::Restart,
        })
        .await
    }
}
