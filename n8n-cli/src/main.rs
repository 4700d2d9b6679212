//! n8n CLI - trigger n8n workflows from the command line.

mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use logging::{LogFormat, init_logging};
use n8n_client::DEFAULT_TIMEOUT_MS;
use std::path::PathBuf;

/// n8n - Trigger workflows on an n8n server.
#[derive(Parser)]
#[command(name = "n8n")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow through the versioned REST API
    Run {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Trigger a workflow through its webhook
    Trigger {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show version information
    Version,
}

/// Server connection options, accepted before or after the subcommand.
#[derive(Args)]
struct ConnectionArgs {
    /// Base URL of the n8n instance
    #[arg(long, env = "N8N_BASE_URL", global = true)]
    base_url: Option<String>,

    /// API key (User Menu -> Settings -> API)
    #[arg(long, env = "N8N_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "N8N_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS, global = true)]
    timeout_ms: u64,
}

/// Workflow and payload arguments shared by trigger commands.
#[derive(Args)]
struct TargetArgs {
    /// Workflow ID (REST) or webhook path (webhook)
    workflow_id: String,

    /// Inline JSON payload
    #[arg(short, long, conflicts_with = "file")]
    data: Option<String>,

    /// Read the JSON payload from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl TargetArgs {
    fn into_options(self, connection: ConnectionArgs) -> Result<commands::trigger::TriggerOptions> {
        let base_url = connection
            .base_url
            .context("--base-url or N8N_BASE_URL is required")?;
        let api_key = connection
            .api_key
            .context("--api-key or N8N_API_KEY is required")?;

        Ok(commands::trigger::TriggerOptions {
            workflow_id: self.workflow_id,
            base_url,
            api_key,
            timeout_ms: connection.timeout_ms,
            data: self.data,
            file: self.file,
        })
    }
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let log_format = std::env::var("N8N_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse::<LogFormat>().ok())
        .unwrap_or_else(|| {
            if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
                LogFormat::Pretty
            } else {
                LogFormat::Compact
            }
        });

    // RUST_LOG wins over the verbosity flag
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| filter.to_string());

    init_logging(&log_filter, log_format)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Run { target } => {
            commands::trigger::run(target.into_options(cli.connection)?).await
        }
        Commands::Trigger { target } => {
            commands::trigger::webhook(target.into_options(cli.connection)?).await
        }
        Commands::Version => commands::version::run(),
    }
}
