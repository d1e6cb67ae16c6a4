//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): calls by route and status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_upstream_failures_total` (counter): upstream failures by kind

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Initialize the Prometheus exporter and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished call.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!("gateway_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
    histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record an upstream failure by its kind label.
pub fn record_upstream_failure(kind: &'static str) {
    counter!("gateway_upstream_failures_total", "kind" => kind).increment(1);
}
