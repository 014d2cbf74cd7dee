//! # Registry Module
//!
//! The live, concurrency-safe route table.
//!
//! ## Overview
//!
//! Controllers attach and detach at runtime, so the registry is a shared
//! mutable structure read by arbitrarily many request threads and written by
//! plugin-lifecycle events from any thread. The discipline is a single
//! exclusive write lock around the committed table:
//!
//! - `attach` validates a whole batch against the table under the write lock
//!   and commits all of it or none of it; no reader ever observes a partial
//!   batch.
//! - `detach` removes by route equality and is idempotent, tolerating
//!   double-invocation during teardown races.
//! - Reads (`find_for_request`, `find_by_handler`, `reverse_url`,
//!   `snapshot`) work against a consistent point-in-time view; routes are
//!   handed out as `Arc`s of immutable values, so a concurrent detach can
//!   never invalidate an in-progress match.
//!
//! No operation here performs I/O or blocks beyond the lock itself; all are
//! expected to complete in bounded, sub-millisecond time. Failures are
//! terminal results returned to the caller (no retry policy inside the
//! registry).

use crate::conflict::{check_conflicts, ConflictError};
use crate::observer::{RegistryObserver, TracingObserver};
use crate::reverse::{url_for, ReverseRouteError};
use crate::route::{HandlerRef, Route};
use crate::router::{match_route, RouteMatch};
use http::Method;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The mutable set of currently active routes.
///
/// Insertion order is preserved: when two different templates both match the
/// same concrete path, the first-registered route wins. Identical
/// (method, template) pairs are rejected at attach time, so that tie-break
/// can only arise across controllers.
///
/// # Example
///
/// ```
/// use http::Method;
/// use wayfinder::{route, RouteRegistry};
///
/// let registry = RouteRegistry::new();
/// registry.attach(
///     "user-controller",
///     vec![route(Method::GET).on("/user/{id}").to("UserController", "show")?],
/// )?;
///
/// let m = registry.find_for_request(&Method::GET, "/user/42").expect("matches");
/// assert_eq!(m.get_path_param("id"), Some("42"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RouteRegistry {
    routes: RwLock<Vec<Arc<Route>>>,
    observer: Box<dyn RegistryObserver>,
}

impl RouteRegistry {
    /// Create an empty registry logging through [`TracingObserver`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(Box::new(TracingObserver))
    }

    /// Create an empty registry with a custom lifecycle observer.
    #[must_use]
    pub fn with_observer(observer: Box<dyn RegistryObserver>) -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
            observer,
        }
    }

    // A poisoned lock still holds a consistent table: every mutation either
    // completes or leaves the previous state, so recover the guard instead
    // of propagating the poison.
    fn read_table(&self) -> RwLockReadGuard<'_, Vec<Arc<Route>>> {
        self.routes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, Vec<Arc<Route>>> {
        self.routes.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a controller's route batch, all-or-nothing.
    ///
    /// The batch is checked against the committed table and against itself;
    /// if any route conflicts, the entire batch is rejected and the table is
    /// left untouched. A partially-registered controller is worse than an
    /// unregistered one. The rest of the system is unaffected by a
    /// rejection; the offending controller is simply not routable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConflictError`] found, identifying both routes
    /// involved.
    pub fn attach(&self, controller_id: &str, routes: Vec<Route>) -> Result<(), ConflictError> {
        let added = routes.len();
        let total;
        {
            let mut table = self.write_table();
            if let Err(conflict) = check_conflicts(&routes, &table) {
                drop(table);
                self.observer.attach_rejected(controller_id, &conflict);
                return Err(conflict);
            }
            table.extend(routes.into_iter().map(Arc::new));
            total = table.len();
        }
        self.observer.attach_accepted(controller_id, added, total);
        Ok(())
    }

    /// Detach a controller by removing exactly the given routes.
    ///
    /// Removal is by route equality, mirroring what the controller passed to
    /// [`RouteRegistry::attach`]; routes not present are skipped, so detach
    /// is idempotent and safe against teardown races.
    pub fn detach(&self, controller_id: &str, routes: &[Route]) {
        let removed;
        let remaining;
        {
            let mut table = self.write_table();
            let before = table.len();
            table.retain(|live| !routes.iter().any(|gone| gone == live.as_ref()));
            remaining = table.len();
            removed = before - remaining;
        }
        self.observer.detached(controller_id, removed, remaining);
    }

    /// Point-in-time copy of the committed routes, insertion-ordered.
    ///
    /// The snapshot is independently iterable; concurrent mutation is never
    /// observed mid-iteration.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<Route>> {
        self.read_table().clone()
    }

    /// Forward lookup: resolve a (method, path) pair to a route.
    ///
    /// Delegates to the matcher over a consistent view of the table. `None`
    /// is the normal not-found outcome; the dispatch collaborator decides
    /// the fallback (typically a 404).
    #[must_use]
    pub fn find_for_request(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let found = {
            let table = self.read_table();
            match_route(&table, method, path)
        };
        if found.is_none() {
            self.observer.no_match(method, path);
        }
        found
    }

    /// Find the first route whose handler satisfies `predicate`.
    #[must_use]
    pub fn find_by_handler(&self, predicate: impl Fn(&HandlerRef) -> bool) -> Option<Arc<Route>> {
        self.read_table()
            .iter()
            .find(|r| predicate(r.handler()))
            .map(Arc::clone)
    }

    /// Reverse routing: synthesize a concrete URL for a handler identity.
    ///
    /// Parameters matching template placeholders are substituted in place;
    /// the rest become a query string in the order supplied. Values are not
    /// URL-escaped here, and placeholders without a matching parameter stay
    /// verbatim in the output; see [`url_for`] for the full contract.
    ///
    /// # Errors
    ///
    /// Returns [`ReverseRouteError`] when no live route owns `handler`. That
    /// is a programming or configuration bug, not runtime data: treat it as
    /// fatal rather than defaulting, or every link built from it will
    /// misroute.
    pub fn reverse_url<K, V>(
        &self,
        handler: &HandlerRef,
        params: &[(K, V)],
    ) -> Result<String, ReverseRouteError>
    where
        K: AsRef<str>,
        V: fmt::Display,
    {
        let route = self
            .find_by_handler(|h| h == handler)
            .ok_or_else(|| ReverseRouteError {
                handler: handler.clone(),
            })?;
        Ok(url_for(&route, params))
    }

    /// Number of committed routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    /// Whether the registry holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_table().is_empty()
    }

    /// Clear all routes; called when the hosting framework stops.
    pub fn shutdown(&self) {
        let dropped;
        {
            let mut table = self.write_table();
            dropped = table.len();
            table.clear();
        }
        self.observer.shutdown(dropped);
    }

    /// Print all registered routes to stdout.
    ///
    /// Useful for verifying which controllers made it into the table.
    pub fn dump_routes(&self) {
        let table = self.read_table();
        println!("[routes] count={}", table.len());
        for route in table.iter() {
            println!("[route] {route}");
        }
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("routes", &self.read_table().len())
            .finish()
    }
}
