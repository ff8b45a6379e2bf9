//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (constraints reference declared roles)
//! - Validate pattern shapes (module-scoped `//...` or catch-all `///*`)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ServingConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ServingConfig;
use crate::deploy::constraints::MODULE_CATCH_ALL;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("constraint {constraint}: url pattern {pattern:?} must be \"///*\" or start with \"//\"")]
    BadUrlPattern { constraint: usize, pattern: String },

    #[error("constraint {constraint}: no resource collections")]
    EmptyConstraint { constraint: usize },

    #[error("constraint {constraint}: role {role:?} is not declared in security_roles")]
    UndeclaredRole { constraint: usize, role: String },

    #[error("error page for status {status} has an empty location")]
    EmptyErrorPageLocation { status: u16 },
}

/// Validate a serving configuration, collecting every problem found.
pub fn validate_config(config: &ServingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, constraint) in config.security_constraints.iter().enumerate() {
        if constraint.resource_collections.is_empty() {
            errors.push(ValidationError::EmptyConstraint { constraint: i });
        }
        for collection in &constraint.resource_collections {
            for pattern in &collection.url_patterns {
                if pattern != MODULE_CATCH_ALL && !pattern.starts_with("//") {
                    errors.push(ValidationError::BadUrlPattern {
                        constraint: i,
                        pattern: pattern.clone(),
                    });
                }
            }
        }
        for role in &constraint.allowed_roles {
            if !config.security_roles.contains(role) {
                errors.push(ValidationError::UndeclaredRole {
                    constraint: i,
                    role: role.clone(),
                });
            }
        }
    }

    for page in &config.error_pages {
        if page.location.is_empty() {
            errors.push(ValidationError::EmptyErrorPageLocation {
                status: page.status,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
