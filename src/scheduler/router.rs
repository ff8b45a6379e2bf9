//! Endpoint scheduling and routing core.
//!
//! # Responsibilities
//! - Accept publish/unpublish requests at any time
//! - Buffer requests until every expected deployer has registered
//! - Route each request to the deployer with the most specific
//!   matching mount path
//!
//! # State Transitions
//! ```text
//! Collecting → Ready: deployer count reaches expected_deployers
//! ```
//! One-way and one-shot: the buffered requests are flushed exactly once,
//! in publication order, and the scheduler never leaves Ready.
//!
//! # Design Decisions
//! - One mutex guards both the pending buffer and the deployer map, so
//!   publishes arriving after the transition are ordered strictly after
//!   the flush
//! - Flush-time failures are logged and dropped, never retried: the
//!   original caller returned long ago
//! - Explicit two-state machine rather than nullable-reference checks

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use url::Url;

use crate::deploy::deployer::{DeployError, EndpointDeployer};
use crate::handler::EndpointHandler;
use crate::observability::metrics;
use crate::routing::MountPath;

/// Error type for scheduler operations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The endpoint's path falls outside every known mount path. This
    /// is the publisher's configuration bug.
    #[error("no deployer mount path matches endpoint {0}")]
    NoMatchingDeployer(Url),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

/// Readiness phase of one scheduler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Fewer deployers known than expected; publishes are buffered.
    Collecting,
    /// All expected deployers known; publishes resolve immediately.
    Ready,
}

struct SchedulerState {
    phase: Phase,
    /// Buffered publications, in arrival order.
    pending: IndexMap<Url, Arc<dyn EndpointHandler>>,
    /// Known deployers, most specific mount path first.
    deployers: BTreeMap<MountPath, Arc<EndpointDeployer>>,
}

/// Coordination core for one module group.
///
/// Publish requests may arrive before the serving infrastructure of
/// their owning module exists; the scheduler buffers them and replays
/// them, caller-invisibly, once every expected deployer has registered.
pub struct EndpointScheduler {
    deployment_name: String,
    expected_deployers: usize,
    state: Mutex<SchedulerState>,
}

impl EndpointScheduler {
    /// Create a scheduler expecting `expected_deployers` sibling
    /// modules. With zero expected deployers the scheduler starts in
    /// the ready phase.
    pub fn new(deployment_name: impl Into<String>, expected_deployers: usize) -> Self {
        let phase = if expected_deployers == 0 {
            Phase::Ready
        } else {
            Phase::Collecting
        };
        Self {
            deployment_name: deployment_name.into(),
            expected_deployers,
            state: Mutex::new(SchedulerState {
                phase,
                pending: IndexMap::new(),
                deployers: BTreeMap::new(),
            }),
        }
    }

    /// Whether all expected deployers have registered.
    pub fn is_ready(&self) -> bool {
        self.lock().phase == Phase::Ready
    }

    /// Number of publications currently buffered.
    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of registered deployers.
    pub fn deployer_count(&self) -> usize {
        self.lock().deployers.len()
    }

    /// Publish an endpoint: deploy it immediately when ready, buffer it
    /// otherwise.
    pub fn publish(
        &self,
        endpoint: &Url,
        handler: Arc<dyn EndpointHandler>,
    ) -> Result<(), SchedulerError> {
        let mut state = self.lock();
        match state.phase {
            Phase::Ready => {
                tracing::debug!(
                    endpoint = %endpoint,
                    deployment = %self.deployment_name,
                    "Publishing endpoint"
                );
                let deployer = resolve(&state, endpoint)
                    .ok_or_else(|| SchedulerError::NoMatchingDeployer(endpoint.clone()))?;
                deployer.deploy(endpoint, handler)?;
                Ok(())
            }
            Phase::Collecting => {
                state.pending.insert(endpoint.clone(), handler);
                metrics::record_pending_endpoints(state.pending.len());
                tracing::debug!(
                    endpoint = %endpoint,
                    deployment = %self.deployment_name,
                    pending = state.pending.len(),
                    "Buffering endpoint until all deployers register"
                );
                Ok(())
            }
        }
    }

    /// Unpublish an endpoint: undeploy it if a matching deployer has an
    /// active unit for it, and drop any buffered publication of it.
    /// Never errors; unpublishing an unknown endpoint is a no-op.
    pub fn unpublish(&self, endpoint: &Url) {
        let mut state = self.lock();
        tracing::debug!(
            endpoint = %endpoint,
            deployment = %self.deployment_name,
            "Unpublishing endpoint"
        );
        if let Some(deployer) = resolve(&state, endpoint) {
            deployer.undeploy(endpoint);
        }
        if state.pending.shift_remove(endpoint).is_some() {
            metrics::record_pending_endpoints(state.pending.len());
        }
    }

    /// Register the deployer of one sibling module. When the expected
    /// count is reached, transitions to ready and flushes the buffer in
    /// publication order.
    pub fn register_deployer(&self, deployer: Arc<EndpointDeployer>) {
        let mut state = self.lock();
        let mount = deployer.mount_path().clone();
        state.deployers.insert(mount.clone(), deployer);
        tracing::info!(
            mount = %mount,
            deployment = %self.deployment_name,
            known = state.deployers.len(),
            expected = self.expected_deployers,
            "Deployer registered"
        );

        if state.phase == Phase::Collecting && state.deployers.len() >= self.expected_deployers {
            state.phase = Phase::Ready;
            self.flush(&mut state);
        }
    }

    /// Resolve the deployer responsible for an endpoint URL, if any.
    pub fn find_deployer(&self, endpoint: &Url) -> Option<Arc<EndpointDeployer>> {
        resolve(&self.lock(), endpoint)
    }

    /// Discard all scheduler state at module-group teardown. Orphaned
    /// pending registrations are expected on unload, not an error.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        if !state.pending.is_empty() {
            tracing::warn!(
                deployment = %self.deployment_name,
                orphaned = state.pending.len(),
                "Discarding pending endpoint registrations on teardown"
            );
        }
        state.pending.clear();
        state.deployers.clear();
        metrics::record_pending_endpoints(0);
    }

    /// Deploy everything buffered so far, in publication order. Entries
    /// that fail to resolve or activate are dropped with an error log;
    /// there is no caller left to surface them to.
    fn flush(&self, state: &mut SchedulerState) {
        let pending = std::mem::take(&mut state.pending);
        if !pending.is_empty() {
            tracing::info!(
                deployment = %self.deployment_name,
                count = pending.len(),
                "All deployers registered, flushing buffered endpoints"
            );
        }
        for (endpoint, handler) in pending {
            match resolve(state, &endpoint) {
                None => {
                    metrics::record_dropped_endpoint();
                    tracing::error!(
                        endpoint = %endpoint,
                        deployment = %self.deployment_name,
                        "Dropping buffered endpoint: no deployer mount path matches"
                    );
                }
                Some(deployer) => {
                    if let Err(error) = deployer.deploy(&endpoint, handler) {
                        metrics::record_dropped_endpoint();
                        tracing::error!(
                            endpoint = %endpoint,
                            deployment = %self.deployment_name,
                            error = %error,
                            "Dropping buffered endpoint: deploy failed"
                        );
                    }
                }
            }
        }
        metrics::record_pending_endpoints(0);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SchedulerState> {
        self.state.lock().expect("scheduler lock poisoned")
    }
}

/// Longest-prefix deployer resolution.
///
/// With a single known deployer every endpoint routes to it without
/// path inspection. Otherwise a single trailing `/` is stripped from
/// the endpoint path and the deployers are scanned most specific mount
/// first.
fn resolve(state: &SchedulerState, endpoint: &Url) -> Option<Arc<EndpointDeployer>> {
    if state.deployers.len() == 1 {
        return state.deployers.values().next().cloned();
    }
    let path = endpoint.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    state
        .deployers
        .iter()
        .find(|(mount, _)| mount.matches(path))
        .map(|(_, deployer)| Arc::clone(deployer))
}
