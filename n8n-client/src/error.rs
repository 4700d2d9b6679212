//! Error types for the n8n client.

use crate::body::ParsedBody;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when using the n8n client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid or missing construction/call argument.
    ///
    /// Always raised before any network request is made.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Network-level failure (connect, DNS, timeout).
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Server answered the REST surface with a status >= 400.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Server answered the webhook surface with a non-success status.
    #[error("n8n webhook error {status}")]
    Webhook {
        /// HTTP status code.
        status: u16,
        /// Parsed response body.
        detail: ParsedBody,
    },

    /// Payload could not be encoded as JSON.
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a configuration error.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.status),
            Self::Webhook { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classification of an HTTP error from the REST surface.
    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        match self {
            Self::Http(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Whether the server rejected the call with 429.
    ///
    /// The client never retries; callers use this to drive their own backoff.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.http_kind(), Some(HttpErrorKind::RateLimit))
            || matches!(self, Self::Webhook { status: 429, .. })
    }
}

/// Kind of HTTP failure, selected by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpErrorKind {
    /// 401 or 403.
    Auth,
    /// 404.
    NotFound,
    /// 429.
    RateLimit,
    /// Any other status >= 400.
    Http,
}

impl HttpErrorKind {
    /// Select the error kind for a failure status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            404 => Self::NotFound,
            429 => Self::RateLimit,
            _ => Self::Http,
        }
    }

    /// Stable name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure response from the REST surface.
///
/// Callers match on [`HttpError::kind`] rather than on distinct error types.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpError {
    /// Classification derived from `status`.
    pub kind: HttpErrorKind,
    /// Best-effort human-readable message derived from the body.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Full parsed response body.
    pub detail: ParsedBody,
}

impl HttpError {
    /// Build an error from a failure status and its parsed body.
    pub fn from_response(status: u16, detail: ParsedBody) -> Self {
        let message = detail
            .error_message()
            .unwrap_or_else(|| format!("n8n error {}", status));

        Self {
            kind: HttpErrorKind::from_status(status),
            message,
            status,
            detail,
        }
    }
}

/// Errors raised by a [`Transport`](crate::Transport) before a response arrives.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request failed for another reason.
    #[error("request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
