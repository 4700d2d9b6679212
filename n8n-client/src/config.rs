//! Client configuration.

use crate::error::{ClientError, Result};
use serde_json::{Value, json};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable holding the server base URL.
pub const ENV_BASE_URL: &str = "N8N_BASE_URL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "N8N_API_KEY";
/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "N8N_TIMEOUT_MS";
/// Environment variable selecting the default trigger mode.
pub const ENV_MODE: &str = "N8N_MODE";

/// Which server surface a trigger goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientMode {
    /// `POST /api/v1/workflows/{id}/run` with a `{"payload": ...}` body and
    /// the full error taxonomy.
    #[default]
    Rest,
    /// `POST /webhook/{id}` with the raw payload as body and a single
    /// generic error on failure.
    Webhook,
}

impl ClientMode {
    /// Path of the trigger endpoint for a workflow.
    pub fn path(&self, workflow_id: &str) -> String {
        match self {
            Self::Rest => format!(
                "/api/v1/workflows/{}/run",
                urlencoding::encode(workflow_id)
            ),
            Self::Webhook => format!("/webhook/{}", workflow_id),
        }
    }

    /// Request body for a payload.
    pub fn wrap_payload(&self, payload: Value) -> Value {
        match self {
            Self::Rest => json!({ "payload": payload }),
            Self::Webhook => payload,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Webhook => "webhook",
        }
    }
}

impl fmt::Display for ClientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "webhook" => Ok(Self::Webhook),
            other => Err(ClientError::config(format!(
                "unknown mode '{}', expected 'rest' or 'webhook'",
                other
            ))),
        }
    }
}

/// Connection settings for a [`WorkflowClient`](crate::WorkflowClient).
///
/// # Example
///
/// ```
/// use n8n_client::{ClientConfig, ClientMode};
///
/// # fn example() -> n8n_client::Result<()> {
/// let config = ClientConfig::new("https://n8n.example.com/", "secret")?
///     .with_timeout_ms(10_000)?
///     .with_mode(ClientMode::Webhook);
///
/// assert_eq!(config.base_url(), "https://n8n.example.com");
/// assert_eq!(config.timeout_ms(), 10_000);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL with trailing slashes removed.
    base_url: String,
    /// Value of the `X-N8N-API-KEY` header.
    api_key: String,
    /// Per-request timeout.
    timeout: Duration,
    /// Surface used by [`WorkflowClient::dispatch`](crate::WorkflowClient::dispatch).
    mode: ClientMode,
}

impl ClientConfig {
    /// Create a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `base_url` or `api_key` is empty.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if base_url.is_empty() {
            return Err(ClientError::config("baseUrl is required"));
        }
        if api_key.is_empty() {
            return Err(ClientError::config("apiKey is required"));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::config("baseUrl must contain a host"));
        }

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            mode: ClientMode::default(),
        })
    }

    /// Load configuration from `N8N_BASE_URL`, `N8N_API_KEY`, and the
    /// optional `N8N_TIMEOUT_MS` and `N8N_MODE`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if a required variable is missing or
    /// a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .ok_or_else(|| ClientError::config(format!("{} is not set", ENV_BASE_URL)))?;
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| ClientError::config(format!("{} is not set", ENV_API_KEY)))?;

        let mut config = Self::new(base_url, api_key)?;

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|e| {
                ClientError::config(format!("{} must be an integer: {}", ENV_TIMEOUT_MS, e))
            })?;
            config = config.with_timeout_ms(ms)?;
        }

        if let Some(raw) = lookup(ENV_MODE) {
            config = config.with_mode(raw.parse()?);
        }

        Ok(config)
    }

    /// Set the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the timeout is zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Set the per-request timeout in milliseconds.
    pub fn with_timeout_ms(self, timeout_ms: u64) -> Result<Self> {
        self.with_timeout(Duration::from_millis(timeout_ms))
    }

    /// Set the default trigger mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ClientMode) -> Self {
        self.mode = mode;
        self
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API key sent with every request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Per-request timeout in milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Default trigger mode.
    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    /// Full URL of the trigger endpoint for a workflow.
    pub(crate) fn endpoint(&self, mode: ClientMode, workflow_id: &str) -> String {
        format!("{}{}", self.base_url, mode.path(workflow_id))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("mode", &self.mode)
            .finish()
    }
}
