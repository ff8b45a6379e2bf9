//! Serving configuration schema definitions.
//!
//! This module defines the shared serving configuration of one module:
//! the security-constraint tree the constraint adapter narrows per
//! endpoint, plus the opaque attributes that are copied verbatim into
//! every scoped configuration. All types derive Serde traits for
//! deserialization from descriptor files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shared serving configuration of one module.
///
/// Everything except `security_constraints` is pass-through: the
/// deployment pipeline copies it into scoped per-endpoint
/// configurations without interpreting it.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServingConfig {
    /// Human-readable name used in logs.
    pub display_name: Option<String>,

    /// URL-pattern scoped security rules for the whole module.
    pub security_constraints: Vec<SecurityConstraint>,

    /// Roles the module declares.
    pub security_roles: Vec<String>,

    /// Principal → roles mappings.
    pub principal_roles: BTreeMap<String, Vec<String>>,

    /// Login configuration (auth method, realm, pages).
    pub login: Option<LoginConfig>,

    /// Session settings.
    pub session: SessionConfig,

    /// Servlet-style init parameters.
    pub init_params: BTreeMap<String, String>,

    /// File extension → MIME type mappings.
    pub mime_mappings: BTreeMap<String, String>,

    /// Locale → charset mappings.
    pub locale_charset_mappings: BTreeMap<String, String>,

    /// Welcome page locations.
    pub welcome_pages: Vec<String>,

    /// Status code → error page locations.
    pub error_pages: Vec<ErrorPage>,

    /// Reject requests whose method no constraint covers.
    pub deny_uncovered_methods: bool,

    /// Default request body encoding.
    pub default_request_encoding: Option<String>,

    /// Default response body encoding.
    pub default_response_encoding: Option<String>,
}

/// A rule pairing URL patterns and HTTP methods with required roles and
/// a transport-guarantee policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecurityConstraint {
    /// The resources this constraint covers.
    pub resource_collections: Vec<ResourceCollection>,

    /// Roles allowed to access the covered resources.
    pub allowed_roles: Vec<String>,

    /// What an empty `allowed_roles` list means.
    pub empty_role_semantic: EmptyRoleSemantic,

    /// Transport requirement for the covered resources.
    pub transport_guarantee: TransportGuarantee,
}

/// A set of URL patterns plus the HTTP methods they cover.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResourceCollection {
    /// URL patterns, scoped to the module (e.g. `//svc/*`) or the
    /// module-wide catch-all `///*`.
    pub url_patterns: Vec<String>,

    /// HTTP methods the constraint applies to (empty = all).
    pub http_methods: Vec<String>,

    /// HTTP methods explicitly excluded.
    pub http_method_omissions: Vec<String>,
}

/// Interpretation of a constraint with no allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmptyRoleSemantic {
    /// Permit access to everyone.
    #[default]
    Permit,
    /// Deny access to everyone.
    Deny,
    /// Require authentication but no particular role.
    Authenticate,
}

/// Transport requirement attached to a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportGuarantee {
    /// Any transport is acceptable.
    #[default]
    None,
    /// Data integrity must be guaranteed.
    Integral,
    /// Confidentiality must be guaranteed (effectively TLS).
    Confidential,
}

/// Login configuration carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginConfig {
    /// Authentication method name (e.g. `BASIC`).
    pub auth_method: String,

    /// Realm presented to clients.
    pub realm_name: Option<String>,

    /// Form login page location.
    pub login_page: Option<String>,

    /// Form login error page location.
    pub error_page: Option<String>,
}

/// Session settings carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle timeout in minutes.
    pub timeout_minutes: u32,

    /// Session cookie name.
    pub cookie_name: String,

    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,

    /// Mark the session cookie `HttpOnly`.
    pub cookie_http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: 30,
            cookie_name: "SESSIONID".to_string(),
            cookie_secure: false,
            cookie_http_only: true,
        }
    }
}

/// Status code → error page mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorPage {
    /// HTTP status code the page is served for.
    pub status: u16,

    /// Page location relative to the module root.
    pub location: String,
}
