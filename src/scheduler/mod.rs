//! Endpoint scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! Route activation (any time):
//!     publish(url, handler)
//!     → Ready?  resolve deployer by longest mount prefix → deploy
//!     → Collecting?  buffer in arrival order
//!
//! Module activation (once per sibling):
//!     register_deployer(deployer)
//!     → count reached?  Collecting → Ready, flush buffer in order
//! ```
//!
//! # Design Decisions
//! - One scheduler instance per module group, passed explicitly to the
//!   activation context; no global registry
//! - A single lock over buffer and deployer map gives the post-flush
//!   ordering guarantee for free

pub mod router;

pub use router::{EndpointScheduler, SchedulerError};
