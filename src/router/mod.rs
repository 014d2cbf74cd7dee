//! # Router Module
//!
//! Pure forward matching: resolve an incoming (method, path) pair against an
//! ordered list of routes.
//!
//! ## Overview
//!
//! Matching walks the parsed template segments produced at route
//! construction:
//!
//! 1. the method must be equal,
//! 2. the concrete path must have the same segment count as the template,
//! 3. literal segments must match exactly; placeholder segments capture any
//!    single non-empty path segment.
//!
//! Routes are tried in registration order, so when two templates overlap
//! (e.g. `/items/special` and `/items/{id}`) the first-registered route wins
//! deterministically. Identical (method, template) pairs never coexist; the
//! conflict detector rejects them before they reach the table.
//!
//! `NotFound` is a normal outcome here, expressed as `None`; the dispatching
//! collaborator turns it into a 404. The matcher itself is a pure function
//! with no side effects.

mod core;

pub use core::{match_route, RouteMatch};
