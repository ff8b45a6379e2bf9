//! Metrics collection.
//!
//! # Metrics
//! - `endpoints_deployed_total` (counter): deploys by mount path
//! - `endpoints_undeployed_total` (counter): undeploys by mount path
//! - `endpoints_dropped_total` (counter): buffered entries discarded at
//!   flush time
//! - `scheduler_pending_endpoints` (gauge): current buffer depth
//!
//! # Design Decisions
//! - Emits through the `metrics` facade only; the embedder decides on
//!   an exporter
//! - Helpers are infallible and cheap enough to call under the
//!   scheduler lock

/// Record one successful deploy under `mount`.
pub fn record_endpoint_deployed(mount: &str) {
    metrics::counter!("endpoints_deployed_total", "mount" => mount.to_string()).increment(1);
}

/// Record one undeploy under `mount`.
pub fn record_endpoint_undeployed(mount: &str) {
    metrics::counter!("endpoints_undeployed_total", "mount" => mount.to_string()).increment(1);
}

/// Record a buffered endpoint discarded during flush.
pub fn record_dropped_endpoint() {
    metrics::counter!("endpoints_dropped_total").increment(1);
}

/// Record the current depth of the pending buffer.
pub fn record_pending_endpoints(count: usize) {
    metrics::gauge!("scheduler_pending_endpoints").set(count as f64);
}
