//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sandbox_requests_total` (counter): requests by route, status
//! - `sandbox_request_duration_seconds` (histogram): latency distribution
//! - `sandbox_signals_total` (counter): signals produced, by kind
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => ::tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => ::tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

pub fn record_request(route: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!("sandbox_requests_total", "route" => route.to_string(), "status" => status).increment(1);
    histogram!("sandbox_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_signal(kind: &'static str) {
    counter!("sandbox_signals_total", "kind" => kind).increment(1);
}
