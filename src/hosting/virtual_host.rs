//! Axum-backed virtual host.
//!
//! # Responsibilities
//! - Keep the mount table of registered servable units
//! - Dispatch incoming requests to the unit with the longest matching
//!   context path
//! - Strip the context path so handlers see paths relative to their own
//!   mount
//!
//! # Design Decisions
//! - Reference implementation of [`HostEnvironment`] for tests and
//!   embedders; the scheduler core stays host-agnostic behind the trait
//! - DashMap mount table: registration and dispatch never contend on a
//!   global lock
//! - Explicit 404 when no unit is mounted at the request path

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use dashmap::DashMap;
use tower_http::trace::TraceLayer;

use crate::deploy::scoped::ScopedServingConfig;
use crate::handler::EndpointHandler;
use crate::hosting::host::{ActivationError, ActiveUnit, HostEnvironment};

/// A shared virtual host serving every endpoint of a module group.
pub struct VirtualHost {
    name: String,
    mounts: DashMap<String, ActiveUnit>,
}

impl VirtualHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mounts: DashMap::new(),
        }
    }

    /// Host name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of currently mounted units.
    pub fn mounted_count(&self) -> usize {
        self.mounts.len()
    }

    /// Find the mounted unit with the longest context path prefixing
    /// `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<ActiveUnit> {
        let mut best: Option<ActiveUnit> = None;
        for entry in self.mounts.iter() {
            if path.starts_with(entry.key().as_str()) {
                let better = best
                    .as_ref()
                    .map_or(true, |b| entry.key().len() > b.context_path().len());
                if better {
                    best = Some(entry.value().clone());
                }
            }
        }
        best
    }

    /// Build an axum router that dispatches every request through this
    /// host's mount table.
    pub fn router(self: Arc<Self>) -> Router {
        let host = self;
        Router::new()
            .fallback(move |request: Request<Body>| {
                let host = Arc::clone(&host);
                async move { host.dispatch(request).await }
            })
            .layer(TraceLayer::new_for_http())
    }

    async fn dispatch(&self, request: Request<Body>) -> Response<Body> {
        let path = request.uri().path().to_string();
        let Some(unit) = self.resolve(&path) else {
            tracing::debug!(host = %self.name, path = %path, "No unit mounted");
            return Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("No endpoint mounted at this path"))
                .unwrap();
        };

        let request = strip_context_path(request, unit.context_path());
        unit.handler().serve(request).await
    }
}

/// Rewrite the request URI so the handler sees a path relative to its
/// own context path.
fn strip_context_path(request: Request<Body>, context_path: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();

    let path = parts.uri.path();
    let mut rest = path[context_path.len().min(path.len())..].to_string();
    if !rest.starts_with('/') {
        rest.insert(0, '/');
    }
    if let Some(query) = parts.uri.query() {
        rest.push('?');
        rest.push_str(query);
    }
    if let Ok(uri) = rest.parse::<axum::http::Uri>() {
        parts.uri = uri;
    }

    Request::from_parts(parts, body)
}

impl HostEnvironment for VirtualHost {
    fn activate(
        &self,
        config: ScopedServingConfig,
        handler: Arc<dyn EndpointHandler>,
    ) -> Result<ActiveUnit, ActivationError> {
        if config.context_path.is_empty() {
            return Err(ActivationError::Rejected(
                "unit has an empty context path".to_string(),
            ));
        }
        Ok(ActiveUnit::new(config, handler))
    }

    fn register(&self, unit: &ActiveUnit) -> Result<(), ActivationError> {
        use dashmap::mapref::entry::Entry;
        match self.mounts.entry(unit.context_path().to_string()) {
            Entry::Occupied(_) => Err(ActivationError::AlreadyRegistered(
                unit.context_path().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(unit.clone());
                tracing::info!(
                    host = %self.name,
                    context_path = %unit.context_path(),
                    mounted = self.mounts.len(),
                    "Unit registered"
                );
                Ok(())
            }
        }
    }

    fn unregister(&self, unit: &ActiveUnit) {
        if self.mounts.remove(unit.context_path()).is_some() {
            tracing::info!(
                host = %self.name,
                context_path = %unit.context_path(),
                mounted = self.mounts.len(),
                "Unit unregistered"
            );
        }
    }
}
