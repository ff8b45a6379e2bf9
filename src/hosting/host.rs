//! Hosting environment boundary.
//!
//! The deployment pipeline never talks to a concrete web server
//! directly; it activates and registers servable units through this
//! trait. Implementations must tolerate configurations that are
//! narrowed clones of a larger module's configuration.

use std::sync::Arc;

use crate::deploy::scoped::ScopedServingConfig;
use crate::handler::EndpointHandler;

/// Error raised by a hosting environment while activating or
/// registering a servable unit.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("context path {0:?} is already registered with this host")]
    AlreadyRegistered(String),

    #[error("host rejected the unit: {0}")]
    Rejected(String),
}

/// The minimal host-activated object serving one endpoint.
///
/// A unit pairs the endpoint's scoped configuration with the handler
/// bound into it. Cloning is cheap; the host and the owning deployer
/// each hold a handle to the same unit.
#[derive(Clone)]
pub struct ActiveUnit {
    config: Arc<ScopedServingConfig>,
    handler: Arc<dyn EndpointHandler>,
}

impl ActiveUnit {
    pub fn new(config: ScopedServingConfig, handler: Arc<dyn EndpointHandler>) -> Self {
        Self {
            config: Arc::new(config),
            handler,
        }
    }

    /// Context path the unit serves, e.g. `/orders/api`.
    pub fn context_path(&self) -> &str {
        &self.config.context_path
    }

    /// The unit's scoped configuration.
    pub fn config(&self) -> &ScopedServingConfig {
        &self.config
    }

    /// The request handler bound into the unit.
    pub fn handler(&self) -> Arc<dyn EndpointHandler> {
        Arc::clone(&self.handler)
    }
}

impl std::fmt::Debug for ActiveUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveUnit")
            .field("context_path", &self.context_path())
            .finish_non_exhaustive()
    }
}

/// Capability of a web-serving host consumed by the deployer.
///
/// `activate` and `register` are non-blocking handshakes; the scheduler
/// may call them while holding its own lock.
pub trait HostEnvironment: Send + Sync {
    /// Create a servable unit from a scoped configuration and the
    /// handler to bind into it.
    fn activate(
        &self,
        config: ScopedServingConfig,
        handler: Arc<dyn EndpointHandler>,
    ) -> Result<ActiveUnit, ActivationError>;

    /// Make a previously activated unit reachable on the host.
    fn register(&self, unit: &ActiveUnit) -> Result<(), ActivationError>;

    /// Remove a unit from the host. Idempotent: unregistering a unit
    /// that is not registered is a no-op.
    fn unregister(&self, unit: &ActiveUnit);
}
