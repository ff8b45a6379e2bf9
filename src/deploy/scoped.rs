//! Scoped per-endpoint configuration.
//!
//! An explicit builder that assembles a fresh, minimal configuration
//! for one endpoint instead of mutating a deep copy of the module's
//! shared configuration. The result is self-contained: it can be
//! activated independently of the source module's own activation state.

use url::Url;

use crate::config::schema::{
    ErrorPage, LoginConfig, SecurityConstraint, ServingConfig, SessionConfig,
};
use crate::deploy::constraints::{narrow_constraints, ENDPOINT_CATCH_ALL};
use std::collections::BTreeMap;

/// Per-endpoint serving configuration derived from a module's shared
/// [`ServingConfig`].
///
/// Carries exactly one handler mapping at `/*` inside the endpoint's
/// own scope, the narrowed security constraints, and verbatim copies of
/// every pass-through attribute. Never mutated after activation.
#[derive(Debug, Clone)]
pub struct ScopedServingConfig {
    /// Context path the unit is mounted at (the endpoint's path).
    pub context_path: String,

    /// Name the unit is registered under; same as the context path.
    pub deployment_name: String,

    /// Security constraints narrowed to this endpoint's scope.
    pub security_constraints: Vec<SecurityConstraint>,

    // Pass-through attributes, copied verbatim from the source.
    pub display_name: Option<String>,
    pub security_roles: Vec<String>,
    pub principal_roles: BTreeMap<String, Vec<String>>,
    pub login: Option<LoginConfig>,
    pub session: SessionConfig,
    pub init_params: BTreeMap<String, String>,
    pub mime_mappings: BTreeMap<String, String>,
    pub locale_charset_mappings: BTreeMap<String, String>,
    pub welcome_pages: Vec<String>,
    pub error_pages: Vec<ErrorPage>,
    pub deny_uncovered_methods: bool,
    pub default_request_encoding: Option<String>,
    pub default_response_encoding: Option<String>,
}

impl ScopedServingConfig {
    /// Pattern the request handler is bound to inside the unit's own
    /// scope. The context path already narrows the unit to one
    /// endpoint, so the mapping is always the catch-all.
    pub const HANDLER_MAPPING: &'static str = ENDPOINT_CATCH_ALL;

    /// Build the configuration for one endpoint against a module's
    /// shared configuration.
    pub fn narrow(source: &ServingConfig, endpoint: &Url) -> Self {
        let context_path = endpoint.path().to_string();
        Self {
            deployment_name: context_path.clone(),
            context_path,
            security_constraints: narrow_constraints(&source.security_constraints, endpoint),
            display_name: source.display_name.clone(),
            security_roles: source.security_roles.clone(),
            principal_roles: source.principal_roles.clone(),
            login: source.login.clone(),
            session: source.session.clone(),
            init_params: source.init_params.clone(),
            mime_mappings: source.mime_mappings.clone(),
            locale_charset_mappings: source.locale_charset_mappings.clone(),
            welcome_pages: source.welcome_pages.clone(),
            error_pages: source.error_pages.clone(),
            deny_uncovered_methods: source.deny_uncovered_methods,
            default_request_encoding: source.default_request_encoding.clone(),
            default_response_encoding: source.default_response_encoding.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ResourceCollection, SecurityConstraint};
    use crate::deploy::constraints::MODULE_CATCH_ALL;

    #[test]
    fn test_narrow_builds_self_contained_config() {
        let source = ServingConfig {
            display_name: Some("orders".to_string()),
            security_roles: vec!["admin".to_string()],
            security_constraints: vec![SecurityConstraint {
                resource_collections: vec![ResourceCollection {
                    url_patterns: vec![MODULE_CATCH_ALL.to_string()],
                    ..Default::default()
                }],
                allowed_roles: vec!["admin".to_string()],
                ..Default::default()
            }],
            init_params: [("debug".to_string(), "false".to_string())].into(),
            ..Default::default()
        };

        let endpoint = Url::parse("http://localhost:8080/orders/api").unwrap();
        let scoped = ScopedServingConfig::narrow(&source, &endpoint);

        assert_eq!(scoped.context_path, "/orders/api");
        assert_eq!(scoped.deployment_name, "/orders/api");
        assert_eq!(ScopedServingConfig::HANDLER_MAPPING, "/*");
        assert_eq!(scoped.security_constraints.len(), 1);
        assert_eq!(scoped.display_name.as_deref(), Some("orders"));
        assert_eq!(scoped.init_params["debug"], "false");
    }
}
