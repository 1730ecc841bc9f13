//! Startup orchestration.
//!
//! # Responsibilities
//! - Compose the API registry from configuration
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes are composed before the listener binds (traffic only when ready)

use std::net::{AddrParseError, SocketAddr};

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::ApiServer;
use crate::lifecycle::{signals, Shutdown};
use crate::namespaces;
use crate::observability::metrics;
use crate::routing::RegistryError;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Route registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Invalid address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Metrics exporter failed: {0}")]
    Metrics(#[from] BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compose the API from configuration.
pub fn build_server(config: ServerConfig) -> Result<ApiServer, StartupError> {
    let registry = namespaces::build_registry(&config.api)?;
    for (path, namespace) in registry.route_table() {
        tracing::info!(
            namespace = %namespace.name(),
            path = %path,
            endpoints = namespace.endpoints().len(),
            "Route registered"
        );
    }
    Ok(ApiServer::new(config, registry)?)
}

/// Run the API server until SIGINT/SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let server = build_server(config.clone())?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
