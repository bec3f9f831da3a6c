//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define function metrics (invocations, outcomes, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `saludo_forward_requests_total` (counter): forwards by outcome, status
//! - `saludo_forward_duration_seconds` (histogram): end-to-end forward latency
//! - `saludo_greeting_requests_total` (counter): greeting invocations
//!
//! # Design Decisions
//! - Recording is a no-op until `init_metrics` installs a recorder
//! - Labels are low-cardinality: outcome and status code only

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

pub const FORWARD_REQUESTS: &str = "saludo_forward_requests_total";
pub const FORWARD_DURATION: &str = "saludo_forward_duration_seconds";
pub const GREETING_REQUESTS: &str = "saludo_greeting_requests_total";

/// Install the Prometheus recorder and its HTTP scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(FORWARD_REQUESTS, "Forwarded invocations by outcome and status");
    describe_histogram!(FORWARD_DURATION, Unit::Seconds, "Forwarded invocation latency");
    describe_counter!(GREETING_REQUESTS, "Greeting invocations");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed forward.
pub fn record_forward(outcome: &'static str, status: u16, start: Instant) {
    counter!(FORWARD_REQUESTS, "outcome" => outcome, "status" => status.to_string()).increment(1);
    histogram!(FORWARD_DURATION, "outcome" => outcome).record(start.elapsed().as_secs_f64());
}

pub fn record_greeting() {
    counter!(GREETING_REQUESTS).increment(1);
}
