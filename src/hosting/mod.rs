//! Hosting environment boundary and reference implementation.
//!
//! # Data Flow
//! ```text
//! Deploy:
//!     EndpointDeployer
//!     → HostEnvironment::activate(scoped config, handler) → ActiveUnit
//!     → HostEnvironment::register(unit)   (unit reachable on the host)
//!
//! Request:
//!     VirtualHost router fallback
//!     → resolve(path)  (longest mounted context path wins)
//!     → strip context path
//!     → EndpointHandler::serve
//! ```
//!
//! # Design Decisions
//! - The deployment pipeline depends only on the `HostEnvironment`
//!   trait; `VirtualHost` is one implementation of it
//! - Activation and registration are separate steps, mirroring the
//!   create-then-expose lifecycle of real servlet hosts

pub mod host;
pub mod virtual_host;

pub use host::{ActivationError, ActiveUnit, HostEnvironment};
pub use virtual_host::VirtualHost;
