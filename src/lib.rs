//! Dynamic endpoint deployment scheduling and routing.
//!
//! Independently-loading application modules register HTTP-reachable
//! endpoints against a web-serving host whose readiness and topology
//! are not known in advance. This crate coordinates the two sides:
//!
//! ```text
//! Route activation                    Module activation
//!     publish(url, handler)               register_deployer(deployer)
//!            │                                    │
//!            ▼                                    ▼
//!     ┌─────────────────────────────────────────────────┐
//!     │          EndpointScheduler (per group)          │
//!     │  Collecting: buffer in arrival order            │
//!     │  Ready: route by longest mount path prefix      │
//!     └────────────────────────┬────────────────────────┘
//!                              ▼
//!     ┌─────────────────────────────────────────────────┐
//!     │         EndpointDeployer (per module)           │
//!     │  narrow security constraints to the endpoint    │
//!     │  build a fresh scoped configuration             │
//!     └────────────────────────┬────────────────────────┘
//!                              ▼
//!     ┌─────────────────────────────────────────────────┐
//!     │     HostEnvironment (e.g. axum VirtualHost)     │
//!     │  activate + register the servable unit          │
//!     └─────────────────────────────────────────────────┘
//! ```
//!
//! Buffered publications are flushed exactly once, in publication
//! order, when the last expected deployer registers. No endpoint is
//! lost and none is served before its module is ready.

// Core subsystems
pub mod config;
pub mod deploy;
pub mod handler;
pub mod hosting;
pub mod routing;
pub mod scheduler;

// Cross-cutting concerns
pub mod observability;

pub use config::ServingConfig;
pub use deploy::{DeployError, EndpointDeployer, ScopedServingConfig};
pub use handler::{EndpointHandler, HandlerFn};
pub use hosting::{ActivationError, ActiveUnit, HostEnvironment, VirtualHost};
pub use routing::MountPath;
pub use scheduler::{EndpointScheduler, SchedulerError};
