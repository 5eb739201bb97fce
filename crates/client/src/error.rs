//! Error types for the netspot control client.

use bytes::Bytes;
use netspot_control_core::ValidationError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when calling the control service.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure: connection refused, timeout, TLS, DNS.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status the operation does not document.
    ///
    /// Only returned when the client raises on unexpected statuses.
    #[error("unexpected status {status}: {}", String::from_utf8_lossy(.content))]
    UnexpectedStatus {
        /// HTTP status code.
        status: StatusCode,
        /// Raw response body.
        content: Bytes,
    },

    /// A request or response body did not match its schema.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns `true` if this is a transport error.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the service answered with an undocumented status.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { .. })
    }

    /// The HTTP status code, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}
