//! Serving configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Descriptor file (TOML)
//!     → loader.rs (parse)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ServingConfig (shared, module-wide)
//!
//! Per endpoint (deploy time):
//!     ServingConfig
//!     → deploy::constraints (narrow security rules)
//!     → deploy::scoped (fresh ScopedServingConfig)
//! ```
//!
//! # Design Decisions
//! - Schema is serde-derived; everything has a sensible default
//! - Non-security attributes are opaque pass-through fields
//! - Validation rejects patterns that can never match any endpoint

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_serving_config, ConfigError};
pub use schema::{
    EmptyRoleSemantic, ErrorPage, LoginConfig, ResourceCollection, SecurityConstraint,
    ServingConfig, SessionConfig, TransportGuarantee,
};
pub use validation::{validate_config, ValidationError};
