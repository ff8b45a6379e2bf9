//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Configure the log level from the environment
//!
//! # Design Decisions
//! - JSON format for production, pretty format for development
//! - Safe to call more than once (embedders may have their own
//!   subscriber installed already)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a tracing subscriber reading its filter from `RUST_LOG`,
/// defaulting to `info` for this crate.
///
/// Returns whether this call installed the subscriber; `false` means
/// one was already set, which is fine for embedded use.
pub fn init_logging(json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "endpoint_scheduler=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    result.is_ok()
}
