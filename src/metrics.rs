//! Metrics for session creation.
//!
//! Recorded through the `metrics` facade. No exporter is installed here, so
//! these are no-ops unless the embedding process installs a recorder.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

/// Sessions created counter metric name.
pub const METRIC_SESSIONS_CREATED: &str = "chatkit_sessions_created_total";
/// Session failures counter metric name.
pub const METRIC_SESSION_FAILURES: &str = "chatkit_session_failures_total";
/// Upstream call latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "chatkit_upstream_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup.
pub fn init_metrics() {
    describe_counter!(
        METRIC_SESSIONS_CREATED,
        "Total number of ChatKit sessions created"
    );
    describe_counter!(
        METRIC_SESSION_FAILURES,
        "Total number of failed session creations, by reason"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Upstream session API latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Record upstream call latency.
pub fn record_upstream_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY).record(latency_ms);
}

/// Increment sessions created counter.
pub fn inc_sessions_created() {
    counter!(METRIC_SESSIONS_CREATED).increment(1);
}

/// Increment session failures counter.
pub fn inc_session_failures(reason: &'static str) {
    counter!(METRIC_SESSION_FAILURES, "reason" => reason).increment(1);
}
