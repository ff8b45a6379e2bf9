//! Per-module endpoint deployer.
//!
//! # Responsibilities
//! - Own the lifecycle of servable units for one module
//! - Build the scoped configuration for each endpoint
//! - Hand units to the hosting environment and record them
//!
//! # Design Decisions
//! - The active-unit map is a DashMap: scheduler-driven and
//!   module-local calls may arrive concurrently
//! - `undeploy` is idempotent; double-unpublish never errors
//! - A unit that activates but fails to register is dropped, never
//!   recorded as active

use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use crate::config::schema::ServingConfig;
use crate::deploy::scoped::ScopedServingConfig;
use crate::handler::EndpointHandler;
use crate::hosting::host::{ActivationError, ActiveUnit, HostEnvironment};
use crate::observability::metrics;
use crate::routing::MountPath;

/// Error type for deploy operations.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("activation of endpoint {endpoint} failed: {source}")]
    Activation {
        endpoint: Url,
        #[source]
        source: ActivationError,
    },

    #[error("registration of endpoint {endpoint} failed: {source}")]
    Registration {
        endpoint: Url,
        #[source]
        source: ActivationError,
    },
}

/// The per-module capability that can activate and deactivate endpoints
/// under its mount path.
///
/// Created when a module becomes ready to accept endpoints; torn down,
/// along with all its active units, when the module is unloaded.
pub struct EndpointDeployer {
    mount_path: MountPath,
    serving_config: Arc<ServingConfig>,
    host: Arc<dyn HostEnvironment>,
    active: DashMap<Url, ActiveUnit>,
}

impl EndpointDeployer {
    pub fn new(
        mount_path: MountPath,
        serving_config: Arc<ServingConfig>,
        host: Arc<dyn HostEnvironment>,
    ) -> Self {
        Self {
            mount_path,
            serving_config,
            host,
            active: DashMap::new(),
        }
    }

    /// The mount path this deployer owns.
    pub fn mount_path(&self) -> &MountPath {
        &self.mount_path
    }

    /// Number of currently active units.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether an active unit exists for `endpoint`.
    pub fn has_endpoint(&self, endpoint: &Url) -> bool {
        self.active.contains_key(endpoint)
    }

    /// Expose an HTTP endpoint under the given URL's path.
    ///
    /// Builds a scoped configuration for the endpoint against this
    /// module's shared configuration, binds the handler into it, and
    /// activates and registers the resulting unit with the host.
    pub fn deploy(
        &self,
        endpoint: &Url,
        handler: Arc<dyn EndpointHandler>,
    ) -> Result<(), DeployError> {
        let scoped = ScopedServingConfig::narrow(&self.serving_config, endpoint);

        tracing::debug!(
            endpoint = %endpoint,
            mount = %self.mount_path,
            context_path = %scoped.context_path,
            constraints = scoped.security_constraints.len(),
            "Activating servable unit"
        );

        let unit = self
            .host
            .activate(scoped, handler)
            .map_err(|source| DeployError::Activation {
                endpoint: endpoint.clone(),
                source,
            })?;

        self.host
            .register(&unit)
            .map_err(|source| DeployError::Registration {
                endpoint: endpoint.clone(),
                source,
            })?;

        self.active.insert(endpoint.clone(), unit);
        metrics::record_endpoint_deployed(self.mount_path.as_str());

        tracing::info!(
            endpoint = %endpoint,
            mount = %self.mount_path,
            active = self.active.len(),
            "Endpoint deployed"
        );
        Ok(())
    }

    /// Remove the endpoint available under the given URL's path.
    ///
    /// No-op when no active unit exists for the URL.
    pub fn undeploy(&self, endpoint: &Url) {
        if let Some((_, unit)) = self.active.remove(endpoint) {
            self.host.unregister(&unit);
            metrics::record_endpoint_undeployed(self.mount_path.as_str());
            tracing::info!(
                endpoint = %endpoint,
                mount = %self.mount_path,
                active = self.active.len(),
                "Endpoint undeployed"
            );
        }
    }

    /// Tear down every unit this deployer still owns (module unload).
    pub fn teardown(&self) {
        let endpoints: Vec<Url> = self.active.iter().map(|e| e.key().clone()).collect();
        if !endpoints.is_empty() {
            tracing::info!(
                mount = %self.mount_path,
                count = endpoints.len(),
                "Tearing down active units"
            );
        }
        for endpoint in endpoints {
            self.undeploy(&endpoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosting::VirtualHost;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use futures_util::FutureExt;

    fn handler() -> Arc<dyn EndpointHandler> {
        Arc::new(crate::handler::HandlerFn(|_req: Request<Body>| {
            async { Response::new(Body::empty()) }.boxed()
        }))
    }

    fn deployer(host: &Arc<VirtualHost>, mount: &str) -> EndpointDeployer {
        EndpointDeployer::new(
            MountPath::new(mount),
            Arc::new(ServingConfig::default()),
            Arc::clone(host) as Arc<dyn HostEnvironment>,
        )
    }

    #[test]
    fn test_deploy_registers_unit_with_host() {
        let host = Arc::new(VirtualHost::new("default"));
        let deployer = deployer(&host, "/app");
        let endpoint = Url::parse("http://localhost:8080/app/svc").unwrap();

        deployer.deploy(&endpoint, handler()).unwrap();

        assert!(deployer.has_endpoint(&endpoint));
        assert_eq!(host.mounted_count(), 1);
        assert_eq!(host.resolve("/app/svc").unwrap().context_path(), "/app/svc");
    }

    #[test]
    fn test_duplicate_deploy_surfaces_host_rejection() {
        let host = Arc::new(VirtualHost::new("default"));
        let deployer = deployer(&host, "/app");
        let endpoint = Url::parse("http://localhost:8080/app/svc").unwrap();

        deployer.deploy(&endpoint, handler()).unwrap();
        let err = deployer.deploy(&endpoint, handler()).unwrap_err();
        assert!(matches!(err, DeployError::Registration { .. }));
    }

    #[test]
    fn test_undeploy_is_idempotent() {
        let host = Arc::new(VirtualHost::new("default"));
        let deployer = deployer(&host, "/app");
        let endpoint = Url::parse("http://localhost:8080/app/svc").unwrap();

        deployer.deploy(&endpoint, handler()).unwrap();
        deployer.undeploy(&endpoint);
        deployer.undeploy(&endpoint);
        deployer.undeploy(&Url::parse("http://localhost:8080/never").unwrap());

        assert_eq!(deployer.active_count(), 0);
        assert_eq!(host.mounted_count(), 0);
    }

    #[test]
    fn test_teardown_unregisters_everything() {
        let host = Arc::new(VirtualHost::new("default"));
        let deployer = deployer(&host, "/app");
        for path in ["/app/a", "/app/b", "/app/c"] {
            let endpoint = Url::parse(&format!("http://localhost:8080{}", path)).unwrap();
            deployer.deploy(&endpoint, handler()).unwrap();
        }
        assert_eq!(host.mounted_count(), 3);

        deployer.teardown();
        assert_eq!(deployer.active_count(), 0);
        assert_eq!(host.mounted_count(), 0);
    }
}
