//! Typed Rust client for triggering n8n workflows.
//!
//! The client wraps two server endpoints:
//!
//! - the versioned REST endpoint `POST /api/v1/workflows/{id}/run`
//!   ([`WorkflowClient::run`]), whose failures are classified into
//!   [`HttpErrorKind`]s
//! - the webhook endpoint `POST /webhook/{id}` ([`WorkflowClient::trigger`]),
//!   which reports any failure as a single [`ClientError::Webhook`]
//!
//! Every call issues exactly one request. The client never retries.
//!
//! # Example
//!
//! ```no_run
//! use n8n_client::{ClientConfig, WorkflowClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https://n8n.example.com", "my-api-key")?
//!     .with_timeout_ms(10_000)?;
//! let client = WorkflowClient::new(config)?;
//!
//! // Versioned REST API
//! let result = client.run("wf1", &json!({ "user_id": "123" })).await?;
//! println!("Started: {:?}", result.data);
//!
//! // Webhook
//! client.trigger("signup-hook", &json!({ "email": "a@b.c" })).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`:
//!
//! ```no_run
//! # use n8n_client::{ClientConfig, ClientError, HttpErrorKind, WorkflowClient};
//! # async fn example(client: WorkflowClient) {
//! match client.run("wf1", &serde_json::json!({})).await {
//!     Ok(result) => println!("Status {}", result.status()),
//!     Err(ClientError::Http(e)) if e.kind == HttpErrorKind::RateLimit => {
//!         println!("Slow down: {}", e.message)
//!     }
//!     Err(ClientError::Http(e)) => println!("n8n said {} ({})", e.message, e.status),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # }
//! ```
//!
//! # Testing
//!
//! [`WorkflowClient::with_transport`] accepts any [`Transport`], so callers
//! can substitute a deterministic transport without a running server.

mod body;
mod client;
mod config;
mod error;
mod transport;
mod types;

pub use body::ParsedBody;
pub use client::{API_KEY_HEADER, WorkflowClient};
pub use config::{
    ClientConfig, ClientMode, DEFAULT_TIMEOUT_MS, ENV_API_KEY, ENV_BASE_URL, ENV_MODE,
    ENV_TIMEOUT_MS,
};
pub use error::{ClientError, HttpError, HttpErrorKind, Result, TransportError};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportFuture};
pub use types::{RawResponse, TriggerResult};
