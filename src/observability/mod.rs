//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging via `tracing`
//! - Counters/gauges via the `metrics` facade
//!
//! # Design Decisions
//! - Deferred-flush failures have no caller to report to; the log and
//!   the drop counter are their only signal
//! - No exporter wiring here: this is a library, the embedder owns the
//!   pipeline

pub mod logging;
pub mod metrics;
