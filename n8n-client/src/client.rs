//! Core n8n client implementation.

use crate::body::ParsedBody;
use crate::config::{ClientConfig, ClientMode};
use crate::error::{ClientError, HttpError, Result};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::types::TriggerResult;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;

/// Header carrying the n8n API key.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// A client for triggering n8n workflows.
///
/// # Example
///
/// ```no_run
/// use n8n_client::{ClientConfig, WorkflowClient};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("https://n8n.example.com", "my-api-key")?;
/// let client = WorkflowClient::new(config)?;
///
/// let result = client.run("wf1", &json!({ "user_id": "123" })).await?;
/// println!("status {}: {:?}", result.status(), result.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    /// Immutable connection settings.
    config: ClientConfig,
    /// Shared transport.
    transport: Arc<dyn Transport>,
}

impl WorkflowClient {
    /// Create a client that sends requests with `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client that sends requests through the given transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Create a client from `N8N_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a workflow through the versioned REST API.
    ///
    /// Sends `POST {base}/api/v1/workflows/{id}/run` with body
    /// `{"payload": <payload>}`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if `workflow_id` is empty
    /// - [`ClientError::Transport`] on network failure or timeout
    /// - [`ClientError::Http`] if the server answers with status >= 400;
    ///   [`HttpError::kind`] tells auth, not-found and rate-limit failures apart
    pub async fn run<T: Serialize + ?Sized>(
        &self,
        workflow_id: &str,
        payload: &T,
    ) -> Result<TriggerResult> {
        self.execute(ClientMode::Rest, workflow_id, payload).await
    }

    /// Trigger a workflow through its webhook.
    ///
    /// Sends `POST {base}/webhook/{id}` with the payload as body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if `workflow_id` is empty
    /// - [`ClientError::Transport`] on network failure or timeout
    /// - [`ClientError::Webhook`] on any non-success status
    pub async fn trigger<T: Serialize + ?Sized>(
        &self,
        workflow_id: &str,
        payload: &T,
    ) -> Result<TriggerResult> {
        self.execute(ClientMode::Webhook, workflow_id, payload).await
    }

    /// Trigger a workflow through the surface selected by [`ClientConfig::mode`].
    pub async fn dispatch<T: Serialize + ?Sized>(
        &self,
        workflow_id: &str,
        payload: &T,
    ) -> Result<TriggerResult> {
        self.execute(self.config.mode(), workflow_id, payload).await
    }

    async fn execute<T: Serialize + ?Sized>(
        &self,
        mode: ClientMode,
        workflow_id: &str,
        payload: &T,
    ) -> Result<TriggerResult> {
        let request = self.build_request(mode, workflow_id, payload)?;

        tracing::debug!(
            mode = %mode,
            method = %request.method,
            url = %request.url,
            "Triggering workflow"
        );

        let response = self.transport.send(request).await?;

        tracing::debug!(
            mode = %mode,
            workflow_id = %workflow_id,
            status = response.status,
            "Workflow trigger response"
        );

        handle_response(mode, response)
    }

    /// Validate arguments and build the outbound request.
    fn build_request<T: Serialize + ?Sized>(
        &self,
        mode: ClientMode,
        workflow_id: &str,
        payload: &T,
    ) -> Result<HttpRequest> {
        if workflow_id.is_empty() {
            return Err(ClientError::config("workflowId is required"));
        }

        let body = mode.wrap_payload(serde_json::to_value(payload)?);

        Ok(HttpRequest {
            method: Method::POST,
            url: self.config.endpoint(mode, workflow_id),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (API_KEY_HEADER.to_string(), self.config.api_key().to_string()),
            ],
            body: serde_json::to_vec(&body)?,
            timeout: self.config.timeout(),
        })
    }
}

/// Map a response to a result or a typed error.
fn handle_response(mode: ClientMode, response: HttpResponse) -> Result<TriggerResult> {
    let status = response.status;
    let body = ParsedBody::parse(&response.body);

    if status < 400 {
        return Ok(TriggerResult::new(status, body));
    }

    match mode {
        ClientMode::Rest => {
            let error = HttpError::from_response(status, body);
            tracing::warn!(
                status = status,
                kind = %error.kind,
                message = %error.message,
                "n8n returned an error"
            );
            Err(ClientError::Http(error))
        }
        ClientMode::Webhook => {
            tracing::warn!(status = status, "n8n webhook returned an error");
            Err(ClientError::Webhook {
                status,
                detail: body,
            })
        }
    }
}
