//! Shared utilities for scheduler integration tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::FutureExt;
use url::Url;

use endpoint_scheduler::{
    ActivationError, ActiveUnit, EndpointDeployer, EndpointHandler, HandlerFn, HostEnvironment,
    MountPath, ScopedServingConfig, ServingConfig,
};

/// Host that records every lifecycle call so tests can assert order.
#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<String>>,
    reject_paths: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Make registration fail for the given context path.
    pub fn reject(&self, context_path: &str) {
        self.reject_paths.lock().unwrap().push(context_path.to_string());
    }
}

impl HostEnvironment for RecordingHost {
    fn activate(
        &self,
        config: ScopedServingConfig,
        handler: Arc<dyn EndpointHandler>,
    ) -> Result<ActiveUnit, ActivationError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("activate {}", config.context_path));
        Ok(ActiveUnit::new(config, handler))
    }

    fn register(&self, unit: &ActiveUnit) -> Result<(), ActivationError> {
        if self
            .reject_paths
            .lock()
            .unwrap()
            .contains(&unit.context_path().to_string())
        {
            return Err(ActivationError::Rejected(format!(
                "forced failure for {}",
                unit.context_path()
            )));
        }
        self.events
            .lock()
            .unwrap()
            .push(format!("register {}", unit.context_path()));
        Ok(())
    }

    fn unregister(&self, unit: &ActiveUnit) {
        self.events
            .lock()
            .unwrap()
            .push(format!("unregister {}", unit.context_path()));
    }
}

/// Handler that ignores the request and returns an empty response.
#[allow(dead_code)]
pub fn noop_handler() -> Arc<dyn EndpointHandler> {
    Arc::new(HandlerFn(|_req: Request<Body>| {
        async { Response::new(Body::empty()) }.boxed()
    }))
}

/// Handler that answers with `tag:<path as the handler saw it>`.
#[allow(dead_code)]
pub fn tagged_handler(tag: &'static str) -> Arc<dyn EndpointHandler> {
    Arc::new(HandlerFn(move |req: Request<Body>| {
        let body = format!("{}:{}", tag, req.uri().path());
        async move { Response::new(Body::from(body)) }.boxed()
    }))
}

/// Endpoint URL on a fixed local authority.
#[allow(dead_code)]
pub fn endpoint(path: &str) -> Url {
    Url::parse(&format!("http://localhost:8080{}", path)).unwrap()
}

/// Deployer for one module, with a default shared configuration.
#[allow(dead_code)]
pub fn deployer_on(host: Arc<dyn HostEnvironment>, mount: &str) -> Arc<EndpointDeployer> {
    Arc::new(EndpointDeployer::new(
        MountPath::new(mount),
        Arc::new(ServingConfig::default()),
        host,
    ))
}
