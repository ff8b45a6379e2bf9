//! Mount path routing primitives.
//!
//! # Data Flow
//! ```text
//! Module activation:
//!     mount path string
//!     → MountPath (normalized segments, ordering key)
//!     → BTreeMap<MountPath, EndpointDeployer> in the scheduler
//!
//! Endpoint resolution:
//!     endpoint URL path
//!     → scan mounts most-specific-first
//!     → first prefix match wins
//! ```
//!
//! # Design Decisions
//! - Prefix matching only, no regex in the resolution path
//! - Deterministic: the comparator is a total order, so resolution is
//!   independent of registration order

pub mod mount_path;

pub use mount_path::MountPath;
