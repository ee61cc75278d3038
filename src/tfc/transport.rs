//! HTTP transport used by the API client
//!
//! The client composes an [`ApiRequest`] and hands it to a [`Transport`], which
//! performs exactly one HTTP exchange and returns the raw status and body.
//! Classification of the outcome (status errors, JSON decoding) stays in the client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Method};

use crate::error::{Result, TfcError};

/// A fully composed request, ready to be sent
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl ApiRequest {
    /// Create a request without headers or body
    pub fn new(method: Method, url: String, timeout: Duration, verify_tls: bool) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            timeout,
            verify_tls,
        }
    }

    /// Set a header, replacing any previous value with the same (case-insensitive) name
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw status and body returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure(pub String);

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display omits the underlying cause (DNS, TLS, refused...)
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        if err.is_timeout() && !message.contains("timed out") {
            message.push_str(" (operation timed out)");
        }
        TransportFailure(message)
    }
}

/// Executes one HTTP exchange
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = std::result::Result<RawResponse, TransportFailure>> + Send;
}

/// Transport backed by a reqwest client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with certificate verification enabled
    pub fn new() -> Result<Self> {
        let client = Self::builder()
            .build()
            .map_err(|e| TfcError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn builder() -> reqwest::ClientBuilder {
        Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
    }

    /// Client to use for a request; insecure clients are built on demand
    fn client_for(&self, verify_tls: bool) -> std::result::Result<Client, TransportFailure> {
        if verify_tls {
            return Ok(self.client.clone());
        }
        debug!("TLS certificate verification disabled for this request");
        Ok(Self::builder().danger_accept_invalid_certs(true).build()?)
    }
}

impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        let client = self.client_for(request.verify_tls)?;

        let mut builder = client
            .request(request.method, request.url.as_str())
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

/// In-process transport replaying canned outcomes and recording requests
#[cfg(test)]
pub(crate) struct StubTransport {
    replies: std::sync::Mutex<
        std::collections::VecDeque<std::result::Result<RawResponse, TransportFailure>>,
    >,
    requests: std::sync::Mutex<Vec<ApiRequest>>,
}

#[cfg(test)]
impl StubTransport {
    pub(crate) fn new() -> Self {
        Self {
            replies: std::sync::Mutex::new(std::collections::VecDeque::new()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportFailure(message.to_string())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Transport for StubTransport {
    async fn execute(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure("no stubbed reply left".to_string())))
    }
}
