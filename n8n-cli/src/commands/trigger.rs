//! Run and trigger commands - start a workflow on an n8n server.

use anyhow::{Context, Result};
use n8n_client::{ClientConfig, ClientError, ParsedBody, TriggerResult, WorkflowClient};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Arguments shared by the run and trigger commands.
pub struct TriggerOptions {
    pub workflow_id: String,
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub data: Option<String>,
    pub file: Option<PathBuf>,
}

impl TriggerOptions {
    fn client(&self) -> Result<WorkflowClient> {
        let config = ClientConfig::new(self.base_url.as_str(), self.api_key.as_str())?
            .with_timeout_ms(self.timeout_ms)?;
        Ok(WorkflowClient::new(config)?)
    }

    fn payload(&self) -> Result<Value> {
        let raw = match (&self.data, &self.file) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload file: {}", path.display()))?,
            (None, None) => return Ok(Value::Object(Default::default())),
        };

        serde_json::from_str(&raw).context("Payload is not valid JSON")
    }
}

/// Run a workflow through the REST API.
pub async fn run(options: TriggerOptions) -> Result<()> {
    let client = options.client()?;
    let payload = options.payload()?;

    tracing::info!(workflow_id = %options.workflow_id, "Running workflow");

    let result = client
        .run(&options.workflow_id, &payload)
        .await
        .map_err(describe)?;
    print_result(&result)
}

/// Trigger a workflow through its webhook.
pub async fn webhook(options: TriggerOptions) -> Result<()> {
    let client = options.client()?;
    let payload = options.payload()?;

    tracing::info!(workflow_id = %options.workflow_id, "Triggering webhook");

    let result = client
        .trigger(&options.workflow_id, &payload)
        .await
        .map_err(describe)?;
    print_result(&result)
}

fn print_result(result: &TriggerResult) -> Result<()> {
    match &result.data {
        ParsedBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        ParsedBody::Text(text) => println!("{}", text),
        ParsedBody::Empty => eprintln!("Workflow accepted (status {})", result.status()),
    }
    Ok(())
}

/// Turn a client error into a user-facing message.
fn describe(error: ClientError) -> anyhow::Error {
    match &error {
        ClientError::Http(e) => {
            anyhow::anyhow!("n8n rejected the request ({} {}): {}", e.kind, e.status, e.message)
        }
        _ => anyhow::Error::new(error),
    }
}
