//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define API metrics (request counts, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Labels are method and status only; raw paths would be unbounded
//! - Recording is a no-op until an exporter is installed

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "api_requests_total";
pub const REQUEST_DURATION: &str = "api_request_duration_seconds";

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    let status = status.to_string();
    metrics::counter!(REQUESTS_TOTAL, "method" => method.to_string(), "status" => status.clone())
        .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method.to_string(), "status" => status)
        .record(start_time.elapsed().as_secs_f64());
}

/// Middleware recording every request that reaches the router.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start_time);
    response
}
