//! Security-constraint narrowing.
//!
//! # Responsibilities
//! - Rewrite module-wide URL patterns into endpoint-local ones
//! - Drop patterns, collections and constraints that do not apply
//! - Force confidential transport for https endpoints
//!
//! # Design Decisions
//! - Pure functions over the config schema, no host types involved
//! - HTTP method inclusions/omissions carry over unchanged
//! - The narrowing never widens: a pattern outside the endpoint's
//!   prefix can never reappear in the result

use url::Url;

use crate::config::schema::{ResourceCollection, SecurityConstraint, TransportGuarantee};

/// Pattern meaning "everything in the module", as written in a shared
/// serving configuration.
pub const MODULE_CATCH_ALL: &str = "///*";

/// Pattern meaning "everything under the endpoint's own scope".
pub const ENDPOINT_CATCH_ALL: &str = "/*";

/// Narrow the module-wide constraints of a shared configuration down to
/// the subset applicable to one endpoint path, rewriting each retained
/// URL pattern into the endpoint's own scope.
pub fn narrow_constraints(source: &[SecurityConstraint], endpoint: &Url) -> Vec<SecurityConstraint> {
    let endpoint_prefix = format!("//{}", endpoint.path());
    let mut result = Vec::new();

    for constraint in source {
        let mut collections = Vec::new();
        for collection in &constraint.resource_collections {
            let url_patterns: Vec<String> = collection
                .url_patterns
                .iter()
                .filter_map(|pattern| {
                    if pattern == MODULE_CATCH_ALL {
                        Some(ENDPOINT_CATCH_ALL.to_string())
                    } else {
                        pattern.strip_prefix(&endpoint_prefix).map(str::to_owned)
                    }
                })
                .collect();

            if !url_patterns.is_empty() {
                collections.push(ResourceCollection {
                    url_patterns,
                    http_methods: collection.http_methods.clone(),
                    http_method_omissions: collection.http_method_omissions.clone(),
                });
            }
        }

        if !collections.is_empty() {
            result.push(SecurityConstraint {
                resource_collections: collections,
                allowed_roles: constraint.allowed_roles.clone(),
                empty_role_semantic: constraint.empty_role_semantic,
                transport_guarantee: transport_guarantee(endpoint, constraint.transport_guarantee),
            });
        }
    }

    result
}

/// Effective transport guarantee for an endpoint: an https endpoint
/// demands confidential transport regardless of what the source
/// constraint specified.
pub fn transport_guarantee(endpoint: &Url, source: TransportGuarantee) -> TransportGuarantee {
    if endpoint.scheme() == "https" {
        TransportGuarantee::Confidential
    } else {
        source
    }
}
