//! Injectable HTTP transport
//!
//! The SDK never talks to the network directly; every endpoint wrapper goes
//! through [`HttpTransport`], a one-method seam that takes the prepared
//! request (method, URL, headers, body) and returns the raw response. The
//! default implementation wraps `reqwest`; tests substitute their own or
//! point the default at a stub server.
//!
//! Calls are stateless and independent. There are no retries and no
//! connection coordination here beyond what `reqwest` pools internally.

use std::time::Duration;

use async_trait::async_trait;
use meridian_domain::{MeridianError, Result};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use reqwest::Method;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("meridian-rust/", env!("CARGO_PKG_VERSION"));

/// A prepared HTTP request, ready for a transport to execute.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, already serialized.
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn bearer(self, access_token: &str) -> Self {
        self.header("Authorization", format!("Bearer {access_token}"))
    }

    /// Attach a JSON body (sets the content type).
    ///
    /// # Errors
    /// Returns [`MeridianError::InvalidInput`] if the value fails to
    /// serialize.
    pub fn json(mut self, body: &impl serde::Serialize) -> Result<Self> {
        let encoded = serde_json::to_string(body)
            .map_err(|err| MeridianError::InvalidInput(format!("failed to encode body: {err}")))?;
        self.body = Some(encoded);
        Ok(self.header("Content-Type", "application/json; charset=utf-8"))
    }
}

/// A raw HTTP response handed back by a transport.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns [`MeridianError::InvalidInput`] naming the decode failure.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|err| MeridianError::InvalidInput(format!("failed to parse response: {err}")))
    }
}

/// Transport seam between the endpoint wrappers and the network.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a single request. Implementations report transport failures
    /// as [`MeridianError::Network`]; non-2xx statuses are returned as
    /// responses, not errors (status mapping is the caller's concern).
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Build the default transport (30s timeout, SDK user agent).
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] when the underlying client cannot
    /// be constructed.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Build the transport with a custom request timeout.
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] when the underlying client cannot
    /// be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| MeridianError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest { method, url, headers, body } = request;

        debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method.clone(), &url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| MeridianError::Network(format!("request to {url} failed: {err}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| MeridianError::Network(format!("failed to read response: {err}")))?;

        debug!(%method, %url, status, "received response");

        Ok(ApiResponse { status, body })
    }
}
