//! Request/response pipeline shared by every operation.
//!
//! Sending an [`Endpoint`] goes through three steps:
//!
//! 1. **Build**: the endpoint's path, query and body are combined with the
//!    client's defaults into a [`PreparedRequest`].
//! 2. **Execute**: the request is sent with either the async or the blocking
//!    transport. Both yield the same raw response.
//! 3. **Parse**: the status code is looked up in the endpoint's response
//!    table to decide how to read the body.

use bytes::Bytes;
use netspot_control_core::{ValidationError, wire};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Client, Error};

/// Path prefix of every control service route.
pub const API_PREFIX: &str = "/v1";

/// How a documented status code is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Parse the body as the endpoint's output.
    Body,
    /// Success without a body.
    Empty,
    /// The addressed resource does not exist.
    NotFound,
}

/// One operation of the control service.
pub trait Endpoint {
    /// Parsed result of a successful call.
    ///
    /// [`Expect::Empty`] statuses decode this from `null`, so operations
    /// without a response body use `()`.
    type Output: DeserializeOwned;

    fn method(&self) -> Method;

    /// Route below [`API_PREFIX`], starting with `/`.
    fn path(&self) -> String;

    /// Query parameters. Parameters without a value are left out.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// JSON request body.
    fn body(&self) -> Result<Option<Value>, ValidationError> {
        Ok(None)
    }

    /// Documented status codes.
    fn responses(&self) -> &'static [(StatusCode, Expect)];

    /// How `status` is handled, or `None` if it is undocumented.
    ///
    /// Looks `status` up in [`Endpoint::responses`]. Endpoints documented
    /// with a whole status class override this.
    fn expect(&self, status: StatusCode) -> Option<Expect> {
        self.responses()
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, expect)| *expect)
    }
}

/// A fully built request, ready for either transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response after the parse step.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body as received.
    pub content: Bytes,
    /// `None` for a not-found status or an unexpected status that was not raised.
    pub parsed: Option<T>,
}

#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    content: Bytes,
}

impl Client {
    /// Send `endpoint` and return its parsed output.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>, Error> {
        Ok(self.send_detailed(endpoint).await?.parsed)
    }

    /// Send `endpoint` and return the whole response.
    pub async fn send_detailed<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Response<E::Output>, Error> {
        let request = self.prepare(endpoint)?;
        let raw = self.execute(request).await?;
        self.parse(endpoint, raw)
    }

    /// Blocking variant of [`Client::send`].
    ///
    /// Must not be called from inside an async runtime.
    pub fn send_blocking<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>, Error> {
        Ok(self.send_detailed_blocking(endpoint)?.parsed)
    }

    /// Blocking variant of [`Client::send_detailed`].
    pub fn send_detailed_blocking<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Response<E::Output>, Error> {
        let request = self.prepare(endpoint)?;
        let raw = self.execute_blocking(request)?;
        self.parse(endpoint, raw)
    }

    /// Build the request for `endpoint` without sending it.
    pub fn prepare<E: Endpoint>(&self, endpoint: &E) -> Result<PreparedRequest, Error> {
        let raw_url = format!("{}{API_PREFIX}{}", self.base_url, endpoint.path());
        let mut url = Url::parse(&raw_url)
            .map_err(|e| Error::Configuration(format!("invalid request URL {raw_url}: {e}")))?;
        let query = endpoint.query();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        let mut headers = self.headers.clone();
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let value = HeaderValue::from_str(&cookie)
                .map_err(|e| Error::Configuration(format!("invalid cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Configuration(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let body = match endpoint.body()? {
            Some(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(serde_json::to_vec(&value).map_err(ValidationError::from)?)
            }
            None => None,
        };

        let method = endpoint.method();
        debug!(%method, %url, "request built");
        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, Error> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(self.timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes().await?;
        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }

    fn execute_blocking(&self, request: PreparedRequest) -> Result<RawResponse, Error> {
        let mut builder = self
            .blocking_client()?
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(self.timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes()?;
        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }

    fn parse<E: Endpoint>(
        &self,
        endpoint: &E,
        raw: RawResponse,
    ) -> Result<Response<E::Output>, Error> {
        debug!(status = %raw.status, bytes = raw.content.len(), "response received");

        let parsed = match endpoint.expect(raw.status) {
            Some(Expect::Body) => Some(wire::from_slice(&raw.content)?),
            Some(Expect::Empty) => Some(wire::from_value(Value::Null)?),
            Some(Expect::NotFound) => None,
            None => {
                warn!(status = %raw.status, path = %endpoint.path(), "unexpected status");
                if self.raise_on_unexpected_status {
                    return Err(Error::UnexpectedStatus {
                        status: raw.status,
                        content: raw.content,
                    });
                }
                None
            }
        };

        Ok(Response {
            status: raw.status,
            headers: raw.headers,
            content: raw.content,
            parsed,
        })
    }
}
