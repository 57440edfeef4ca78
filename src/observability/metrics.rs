//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_requests_total` (counter): requests by method and status
//! - `redirect_request_duration_seconds` (histogram): dispatch latency
//! - `redirect_table_entries` (gauge): entries in the published snapshot
//!
//! Recording is a no-op until `init_metrics` installs the recorder, so
//! tests and metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint started"),
        Err(error) => tracing::error!(%error, "failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "redirect_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    metrics::histogram!("redirect_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of the published redirect table.
pub fn record_table_size(entries: usize) {
    metrics::gauge!("redirect_table_entries").set(entries as f64);
}
