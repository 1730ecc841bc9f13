//! Stack Overflow Lite API server (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌─────────────────────────────────────────────────┐
//!                      │                   API SERVER                    │
//!                      │                                                 │
//!   Client Request     │  ┌──────────┐   ┌───────────┐   ┌────────────┐  │
//!   ───────────────────┼─▶│ listener │──▶│middleware │──▶│  /api/v1   │  │
//!                      │  │ (tokio)  │   │ id/trace  │   │  registry  │  │
//!                      │  └──────────┘   └───────────┘   └─────┬──────┘  │
//!                      │                          ┌──────┴──────┐        │
//!                      │                          ▼             ▼        │
//!                      │                    ┌──────────┐  ┌──────────┐   │
//!                      │                    │  /users  │  │  /auth   │   │
//!                      │                    └──────────┘  └──────────┘   │
//!                      │                                                 │
//!                      │   config · observability · lifecycle            │
//!                      └─────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use overflow_api::config::{self, validation::validate_config, ConfigError, ServerConfig};
use overflow_api::lifecycle::startup;
use overflow_api::observability::logging;

#[derive(Parser)]
#[command(name = "overflow-api")]
#[command(about = "Stack Overflow Lite API server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "overflow-api starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        prefix = %config.api.prefix,
        api_version = %config.api.version,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
