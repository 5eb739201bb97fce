//! netspot control HTTP client
//!
//! A typed Rust client for the netspot control service REST API.
//!
//! # Quick Start
//!
//! ```no_run
//! use netspot_control_client::Client;
//! use netspot_control_core::{MinerConfig, NetspotConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netspot_control_client::Error> {
//!     let client = Client::new("http://127.0.0.1:11000");
//!
//!     // Register a detector and start it
//!     let config = NetspotConfig::new(MinerConfig::new("lan").with_device("eth0"));
//!     client.add_netspot(&config).await?;
//!
//!     for status in client.start_all().await?.unwrap_or_default() {
//!         println!("{}: {}", status.name, status.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Operations
//!
//! Every route is a typed [`Endpoint`] value. Convenience methods such as
//! [`Client::get_netspot`] send them asynchronously; any endpoint can also be
//! sent from synchronous code with [`Client::send_blocking`]:
//!
//! ```no_run
//! use netspot_control_client::Client;
//! use netspot_control_client::configuration::GetNetspot;
//!
//! let client = Client::new("http://127.0.0.1:11000");
//! match client.send_blocking(&GetNetspot::new(42))? {
//!     Some(config) => println!("{}", config.configuration.name),
//!     None => println!("no such detector"),
//! }
//! # Ok::<(), netspot_control_client::Error>(())
//! ```
//!
//! Operations return `Ok(None)` for a documented not-found status, and for
//! any undocumented status unless the client was built with
//! [`ClientBuilder::raise_on_unexpected_status`].
//!
//! # Configuration
//!
//! ```no_run
//! use netspot_control_client::ClientBuilder;
//! use std::time::Duration;
//!
//! let client = ClientBuilder::new("https://netspot.local:11000")
//!     .timeout(Duration::from_secs(10))
//!     .token("your-token")
//!     .verify_ssl(false)
//!     .raise_on_unexpected_status(true)
//!     .build()
//!     .unwrap();
//! ```

pub mod config;
pub mod configuration;
mod error;
pub mod network;
pub mod pipeline;
pub mod statistics;
pub mod status;
pub mod testing;
pub mod webhooks;

pub use config::ClientConfig;
pub use error::Error;
pub use pipeline::{Endpoint, Expect, PreparedRequest, Response};

// Re-export the wire models so callers don't need a direct core dependency.
pub use netspot_control_core as models;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the netspot control service.
///
/// Immutable once built: the `with_*` methods return modified copies that
/// share the underlying connection pool. Safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    blocking: Arc<OnceLock<reqwest::blocking::Client>>,
    base_url: String,
    headers: HeaderMap,
    cookies: BTreeMap<String, String>,
    timeout: Duration,
    raise_on_unexpected_status: bool,
    verify_ssl: bool,
    token: Option<String>,
}

/// Builder for configuring a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
    cookies: BTreeMap<String, String>,
    raise_on_unexpected_status: bool,
    verify_ssl: bool,
    token: Option<String>,
    client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
            cookies: BTreeMap::new(),
            raise_on_unexpected_status: false,
            verify_ssl: true,
            token: None,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a cookie sent with every request.
    #[must_use]
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Set the bearer token for authentication.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Return [`Error::UnexpectedStatus`] instead of `None` for undocumented statuses.
    #[must_use]
    pub fn raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    /// Verify the server's TLS certificate. Enabled by default.
    #[must_use]
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Use a custom reqwest Client for async requests.
    ///
    /// Useful for configuring proxies or custom root certificates. The
    /// blocking transport is still built from this builder's settings.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Configuration(format!("invalid base URL {}: {e}", self.base_url)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            headers.insert(parse_header_name(name)?, parse_header_value(value)?);
        }

        let http = match self.client {
            Some(c) => c,
            None => reqwest::Client::builder()
                .danger_accept_invalid_certs(!self.verify_ssl)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(Client {
            http,
            blocking: Arc::new(OnceLock::new()),
            base_url: self.base_url,
            headers,
            cookies: self.cookies,
            timeout: self.timeout,
            raise_on_unexpected_status: self.raise_on_unexpected_status,
            verify_ssl: self.verify_ssl,
            token: self.token,
        })
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, Error> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::Configuration(format!("invalid header name {name}: {e}")))
}

fn parse_header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Configuration(format!("invalid header value: {e}")))
}

impl Client {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use netspot_control_client::Client;
    ///
    /// let client = Client::new("http://127.0.0.1:11000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Create a client from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = ClientBuilder::new(config.base_url.clone())
            .raise_on_unexpected_status(config.raise_on_unexpected_status)
            .verify_ssl(config.verify_ssl);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = &config.token {
            builder = builder.token(token.clone());
        }
        builder.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Cookies sent with every request.
    pub fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn raise_on_unexpected_status(&self) -> bool {
        self.raise_on_unexpected_status
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// A copy of this client with `headers` added to the defaults.
    #[must_use]
    pub fn with_headers(&self, headers: HeaderMap) -> Self {
        let mut client = self.clone();
        client.headers.extend(headers);
        client
    }

    /// A copy of this client with `cookies` added to the defaults.
    #[must_use]
    pub fn with_cookies<I, K, V>(&self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut client = self.clone();
        client
            .cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        client
    }

    /// A copy of this client with a different timeout.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut client = self.clone();
        client.timeout = timeout;
        client
    }

    /// The blocking transport, built on first use.
    ///
    /// Construction is deferred so that a client created inside an async
    /// runtime never spins up the blocking runtime there.
    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, Error> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(!self.verify_ssl)
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        Ok(self.blocking.get_or_init(|| client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = Client::new("http://localhost:11000/");
        assert_eq!(client.base_url(), "http://localhost:11000");
    }

    #[test]
    fn client_preserves_url_without_slash() {
        let client = Client::new("http://localhost:11000");
        assert_eq!(client.base_url(), "http://localhost:11000");
    }

    #[test]
    fn builder_sets_token_and_policy() {
        let client = ClientBuilder::new("http://localhost:11000")
            .token("test-token")
            .raise_on_unexpected_status(true)
            .verify_ssl(false)
            .build()
            .unwrap();
        assert_eq!(client.token, Some("test-token".to_string()));
        assert!(client.raise_on_unexpected_status());
        assert!(!client.verify_ssl());
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        let err = ClientBuilder::new("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn builder_rejects_invalid_header() {
        let err = ClientBuilder::new("http://localhost:11000")
            .header("bad header", "v")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = ClientBuilder::new("http://localhost:11000")
            .header("X-Ok", "line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn with_helpers_return_modified_copies() {
        let client = ClientBuilder::new("http://localhost:11000")
            .cookie("session", "1")
            .build()
            .unwrap();

        let mut extra = HeaderMap::new();
        extra.insert("x-trace", HeaderValue::from_static("abc"));
        let derived = client
            .with_headers(extra)
            .with_cookies([("theme", "dark")])
            .with_timeout(Duration::from_secs(1));

        assert!(client.headers().is_empty());
        assert_eq!(client.cookies().len(), 1);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        assert_eq!(derived.headers()["x-trace"], "abc");
        assert_eq!(derived.cookies()["session"], "1");
        assert_eq!(derived.cookies()["theme"], "dark");
        assert_eq!(derived.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn from_config_applies_every_setting() {
        let config = ClientConfig::new("http://localhost:11000/")
            .with_token("t")
            .with_timeout(Duration::from_secs(3))
            .with_raise_on_unexpected_status(true)
            .with_verify_ssl(false);
        let client = Client::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11000");
        assert_eq!(client.token.as_deref(), Some("t"));
        assert_eq!(client.timeout(), Duration::from_secs(3));
        assert!(client.raise_on_unexpected_status());
        assert!(!client.verify_ssl());
    }
}
