//! Request-handling capability supplied by endpoint publishers.
//!
//! The scheduler and deployer never inspect a handler's body; they only
//! carry it from `publish` to the activated servable unit.

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

/// An opaque handler exposed at one endpoint path.
///
/// The host strips the endpoint's context path before calling `serve`,
/// so the handler always sees paths relative to its own mount.
pub trait EndpointHandler: Send + Sync + 'static {
    /// Handle one request addressed to this endpoint.
    fn serve(&self, request: Request<Body>) -> BoxFuture<'static, Response<Body>>;
}

/// Closure adapter for [`EndpointHandler`].
pub struct HandlerFn<F>(pub F);

impl<F> EndpointHandler for HandlerFn<F>
where
    F: Fn(Request<Body>) -> BoxFuture<'static, Response<Body>> + Send + Sync + 'static,
{
    fn serve(&self, request: Request<Body>) -> BoxFuture<'static, Response<Body>> {
        (self.0)(request)
    }
}
