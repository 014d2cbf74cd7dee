//! Registry lifecycle observation.
//!
//! The registry itself performs no I/O; logging is factored out behind
//! [`RegistryObserver`], invoked at the well-defined lifecycle points:
//! attach accepted, attach rejected, detach, forward-match miss, shutdown.
//! The default [`TracingObserver`] emits structured `tracing` events; embed
//! [`NullObserver`] to silence the registry entirely.

use crate::conflict::ConflictError;
use http::Method;
use tracing::{debug, error, info};

/// Callbacks fired by the registry at its lifecycle points.
///
/// All methods default to no-ops so implementors only override the events
/// they care about. Observers are called outside the registry's lock and
/// must not call back into the registry's write operations from the same
/// thread-of-control if they want to avoid self-serialization; they should
/// be cheap and non-blocking.
pub trait RegistryObserver: Send + Sync {
    /// A controller's batch was admitted atomically.
    fn attach_accepted(&self, controller_id: &str, added: usize, total: usize) {
        let _ = (controller_id, added, total);
    }

    /// A controller's batch was rejected wholesale; none of its routes are live.
    fn attach_rejected(&self, controller_id: &str, error: &ConflictError) {
        let _ = (controller_id, error);
    }

    /// Routes were removed for a detaching controller.
    fn detached(&self, controller_id: &str, removed: usize, remaining: usize) {
        let _ = (controller_id, removed, remaining);
    }

    /// A forward match found no route; the dispatch collaborator will 404.
    fn no_match(&self, method: &Method, path: &str) {
        let _ = (method, path);
    }

    /// The registry was shut down and cleared.
    fn shutdown(&self, dropped: usize) {
        let _ = dropped;
    }
}

/// Default observer emitting structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RegistryObserver for TracingObserver {
    fn attach_accepted(&self, controller_id: &str, added: usize, total: usize) {
        info!(
            controller = controller_id,
            routes_added = added,
            routes_total = total,
            "Controller routes attached"
        );
    }

    fn attach_rejected(&self, controller_id: &str, error: &ConflictError) {
        error!(
            controller = controller_id,
            %error,
            "Controller declares conflicting routes, controller is not routable"
        );
    }

    fn detached(&self, controller_id: &str, removed: usize, remaining: usize) {
        info!(
            controller = controller_id,
            routes_removed = removed,
            routes_total = remaining,
            "Controller routes detached"
        );
    }

    fn no_match(&self, method: &Method, path: &str) {
        debug!(method = %method, path = %path, "No route matched");
    }

    fn shutdown(&self, dropped: usize) {
        info!(routes_dropped = dropped, "Route registry shut down");
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RegistryObserver for NullObserver {}
