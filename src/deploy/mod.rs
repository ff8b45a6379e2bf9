//! Endpoint deployment pipeline.
//!
//! # Data Flow
//! ```text
//! deploy(endpoint URL, handler):
//!     ServingConfig (module-wide, shared)
//!     → constraints.rs (narrow security rules to the endpoint path)
//!     → scoped.rs (fresh ScopedServingConfig, one mapping at /*)
//!     → HostEnvironment::activate + register
//!     → record ActiveUnit under the endpoint URL
//!
//! undeploy(endpoint URL):
//!     remove recorded unit → HostEnvironment::unregister
//! ```
//!
//! # Design Decisions
//! - One deployer per sibling module; it owns its active-unit map
//! - Scoped configurations are built fresh, never mutated deep copies
//! - The deployer is host-agnostic: all server interaction goes through
//!   the `HostEnvironment` trait

pub mod constraints;
pub mod deployer;
pub mod scoped;

pub use deployer::{DeployError, EndpointDeployer};
pub use scoped::ScopedServingConfig;
