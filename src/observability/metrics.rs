//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define edge metrics (requests, latency, routing decisions)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by decision, status
//! - `edge_request_duration_seconds` (histogram): latency by decision
//! - `edge_routing_decisions_total` (counter): decisions by host rule
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels are small closed sets, never the tenant name

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "edge_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "edge_request_duration_seconds";
pub const ROUTING_DECISIONS_TOTAL: &str = "edge_routing_decisions_total";

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(decision: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "decision" => decision,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "decision" => decision)
        .record(start.elapsed().as_secs_f64());
}

/// Record which host rule produced which decision.
pub fn record_decision(rule: &'static str, decision: &'static str) {
    metrics::counter!(ROUTING_DECISIONS_TOTAL, "rule" => rule, "decision" => decision)
        .increment(1);
}
