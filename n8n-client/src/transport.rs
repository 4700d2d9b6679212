//! HTTP transport abstraction.
//!
//! The client builds an [`HttpRequest`] and hands it to a [`Transport`].
//! [`ReqwestTransport`] is used unless another transport is injected.

use crate::error::TransportError;
use bytes::Bytes;
use reqwest::{Client as HttpClient, Method};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs, in send order.
    pub headers: Vec<(String, String)>,
    /// Encoded request body.
    pub body: Vec<u8>,
    /// Deadline for the whole exchange.
    pub timeout: Duration,
}

impl HttpRequest {
    /// Value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as seen by the client: status and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes. Empty if the body could not be read.
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and waits for its response.
///
/// Implementations must not retry; one call is one outbound request.
pub trait Transport: Send + Sync + Debug {
    /// Send a request.
    fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    /// Create a transport with a fresh `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .build()
            .map_err(|e| TransportError::Request(Box::new(e)))?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }

    fn map_error(err: reqwest::Error, timeout: Duration) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(Box::new(err))
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let timeout = request.timeout;
            let mut builder = self
                .http
                .request(request.method, &request.url)
                .timeout(timeout)
                .body(request.body);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(e, timeout))?;
            let status = response.status().as_u16();

            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => return Err(TransportError::Timeout(timeout)),
                Err(e) => {
                    tracing::warn!(status = status, error = %e, "Failed to read response body");
                    Bytes::new()
                }
            };

            Ok(HttpResponse { status, body })
        })
    }
}
