//! Configuration for connecting to a netspot control service.

use std::time::Duration;

pub const ENV_URL: &str = "NETSPOT_CONTROL_URL";
pub const ENV_TOKEN: &str = "NETSPOT_CONTROL_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "NETSPOT_CONTROL_TIMEOUT_SECS";
pub const ENV_RAISE_ON_UNEXPECTED_STATUS: &str = "NETSPOT_CONTROL_RAISE_ON_UNEXPECTED_STATUS";
pub const ENV_VERIFY_SSL: &str = "NETSPOT_CONTROL_VERIFY_SSL";

/// Service URL used when none is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1:80";

/// Connection settings for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root URL (e.g. `http://127.0.0.1:11000`), without the `/v1` prefix.
    pub base_url: String,
    /// Bearer token for authentication.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Return an error for statuses an operation does not document.
    pub raise_on_unexpected_status: bool,
    /// Verify the server's TLS certificate.
    pub verify_ssl: bool,
}

impl ClientConfig {
    /// Create a new configuration with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: None,
            raise_on_unexpected_status: false,
            verify_ssl: true,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `NETSPOT_CONTROL_URL` (defaults to `http://127.0.0.1:80`)
    /// - `NETSPOT_CONTROL_TOKEN` (optional)
    /// - `NETSPOT_CONTROL_TIMEOUT_SECS` (optional)
    /// - `NETSPOT_CONTROL_RAISE_ON_UNEXPECTED_STATUS` (optional, default `false`)
    /// - `NETSPOT_CONTROL_VERIFY_SSL` (optional, default `true`)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_URL).unwrap_or_else(|| DEFAULT_URL.to_string());
        let token = lookup(ENV_TOKEN).filter(|t| !t.is_empty());
        let timeout = lookup(ENV_TIMEOUT_SECS)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let raise_on_unexpected_status = lookup(ENV_RAISE_ON_UNEXPECTED_STATUS)
            .and_then(|s| parse_flag(&s))
            .unwrap_or(false);
        let verify_ssl = lookup(ENV_VERIFY_SSL)
            .and_then(|s| parse_flag(&s))
            .unwrap_or(true);

        Self {
            base_url,
            token,
            timeout,
            raise_on_unexpected_status,
            verify_ssl,
        }
    }

    /// Override the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    #[must_use]
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
