//! # Wayfinder
//!
//! **Wayfinder** is a dynamic route registry and reverse-routing engine for
//! plugin-style web frameworks: controllers contribute routes at runtime,
//! batches are admitted atomically after conflict checking, and the same
//! parsed template grammar drives both forward matching and reverse-URL
//! synthesis.
//!
//! ## Overview
//!
//! Frameworks whose controllers activate and deactivate while the process is
//! running cannot build their routing table once at startup. Wayfinder keeps
//! that table correct under dynamic mutation:
//!
//! - **Attach/detach lifecycle** — a controller hands the registry an ordered
//!   batch of routes on activation and the same batch on deactivation. A
//!   batch is committed all-or-nothing: one conflicting route rejects the
//!   whole contribution, so a controller is either fully routable or not
//!   routable at all.
//! - **Conflict detection** — two distinct routes may never share a
//!   (method, URL template) pair. Collisions are reported with both handler
//!   identities for operator diagnosis; the rest of the system keeps running.
//! - **Forward matching** — `(method, path)` resolves to the first matching
//!   route in registration order, extracting `{name}` path parameters. A miss
//!   is a normal outcome the caller turns into a 404.
//! - **Reverse routing** — a handler identity plus named parameters yields a
//!   concrete URL, substituting placeholders and appending leftover
//!   parameters as a query string.
//!
//! ## Architecture
//!
//! - **[`route`](mod@route)** - the immutable [`Route`] value, handler identities, and
//!   the URL template grammar parsed once at construction
//! - **[`router`]** - pure forward matching over an ordered route table
//! - **[`conflict`]** - batch conflict detection and [`ConflictError`]
//! - **[`registry`]** - the lock-guarded live table: attach, detach,
//!   snapshots, forward and reverse lookup
//! - **[`reverse`]** - URL synthesis from a route and a parameter map
//! - **[`observer`]** - injected lifecycle callbacks; the default logs
//!   through `tracing`, keeping the core itself free of I/O
//!
//! ## Quick Start
//!
//! ```
//! use http::Method;
//! use wayfinder::{route, HandlerRef, RouteRegistry};
//!
//! let registry = RouteRegistry::new();
//!
//! // Controller activation contributes a batch of routes.
//! registry.attach(
//!     "user-controller",
//!     vec![
//!         route(Method::GET).on("/user/{id}").to("UserController", "show")?,
//!         route(Method::POST).on("/user").to("UserController", "create")?,
//!     ],
//! )?;
//!
//! // Forward: dispatch an inbound request.
//! let m = registry
//!     .find_for_request(&Method::GET, "/user/42")
//!     .expect("route matches");
//! assert_eq!(m.get_path_param("id"), Some("42"));
//!
//! // Reverse: build a link back to the same endpoint.
//! let url = registry.reverse_url(
//!     &HandlerRef::new("UserController", "show"),
//!     &[("id", "42"), ("tab", "posts")],
//! )?;
//! assert_eq!(url, "/user/42?tab=posts");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Concurrency
//!
//! The registry is the only shared mutable state. Writers (attach/detach)
//! take one exclusive lock across the atomic batch mutation; readers work
//! against consistent snapshots of `Arc`-shared immutable routes, so an
//! in-progress match can never observe a half-committed batch or be
//! invalidated by a concurrent detach. Nothing in this crate performs
//! network or disk I/O.

pub mod conflict;
pub mod observer;
pub mod registry;
pub mod reverse;
pub mod route;
pub mod router;

pub use conflict::{check_conflicts, ConflictError, ConflictKind};
pub use observer::{NullObserver, RegistryObserver, TracingObserver};
pub use registry::RouteRegistry;
pub use reverse::{url_for, ReverseRouteError};
pub use route::{
    route, HandlerRef, ParamVec, Route, RouteBuilder, Segment, TemplateError, UrlTemplate,
    MAX_INLINE_PARAMS,
};
pub use router::{match_route, RouteMatch};
