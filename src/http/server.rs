//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Freeze the API registry into the Axum Router
//! - Add the health endpoint and the JSON 404 and 405 fallbacks
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Serve on a listener until shutdown, then drain with a deadline

use std::future::IntoFuture;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Span;

use crate::config::ServerConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response;
use crate::observability::metrics::track_requests;
use crate::routing::{path, ApiRegistry, RegistryError};

/// Liveness endpoint, outside the API prefix.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: String,
}

/// HTTP server for the API.
pub struct ApiServer {
    router: Router,
    config: ServerConfig,
}

impl ApiServer {
    /// Create a server serving the given registry.
    pub fn new(config: ServerConfig, registry: ApiRegistry) -> Result<Self, RegistryError> {
        if let Some(taken) = registry
            .route_table()
            .into_keys()
            .find(|p| path::overlaps(p, HEALTH_PATH))
        {
            return Err(RegistryError::ReservedPath { path: taken });
        }

        let version = registry.version().to_string();
        let api = registry.into_router()?;
        let router = Self::build_router(&config, api, version);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, api: Router, version: String) -> Router {
        let health = HealthStatus {
            status: "ok",
            version,
        };

        api.route(HEALTH_PATH, get(move || async move { Json(health) }))
            .fallback(response::fallback)
            .method_not_allowed_fallback(response::method_not_allowed)
            .layer(middleware::from_fn(track_requests))
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops accepting on the first shutdown message and waits at most
    /// `timeouts.shutdown_secs` for in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let grace = Duration::from_secs(self.config.timeouts.shutdown_secs);
        let mut deadline = shutdown.resubscribe();

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .into_future();

        tokio::select! {
            result = serve => result?,
            _ = async {
                let _ = deadline.recv().await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!(grace_secs = grace.as_secs(), "Drain deadline reached, closing remaining connections");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The fully layered router, for serving it elsewhere or in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = request_id(request).unwrap_or("unknown"),
    )
}
