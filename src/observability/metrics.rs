//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_gate_requests_total` (counter): responses by status
//! - `site_gate_upstream_duration_seconds` (histogram): upstream latency
//! - `site_gate_not_found_total` (counter): upstream 404s eligible for redirects, by site
//! - `site_gate_redirects_total` (counter): redirects issued, by site

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16) {
    counter!("site_gate_requests_total", "status" => status.to_string()).increment(1);
}

pub fn record_upstream(start: Instant) {
    histogram!("site_gate_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_not_found(site_id: u64) {
    counter!("site_gate_not_found_total", "site" => site_id.to_string()).increment(1);
}

pub fn record_redirect(site_id: u64) {
    counter!("site_gate_redirects_total", "site" => site_id.to_string()).increment(1);
}
