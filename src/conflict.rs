//! Conflict detection for candidate route batches.

use crate::route::{HandlerRef, Route};
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Where a conflict was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// A candidate collides with a route already committed to the registry.
    AgainstRegistry,
    /// Two routes within the same candidate batch collide with each other.
    WithinBatch,
}

/// A candidate route collides with an existing or sibling route.
///
/// Carries both handler identities so an operator can tell which two
/// controllers fought over the same (method, template) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictError {
    /// HTTP method of the colliding routes
    pub method: Method,
    /// URL template both routes claim
    pub template: String,
    /// Handler that already holds the (method, template) pair
    pub existing: HandlerRef,
    /// Handler whose registration was refused
    pub candidate: HandlerRef,
    /// Whether the collision was against the registry or inside the batch
    pub kind: ConflictKind,
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConflictKind::AgainstRegistry => write!(
                f,
                "{} {} is already registered to {} (rejected candidate: {})",
                self.method, self.template, self.existing, self.candidate
            ),
            ConflictKind::WithinBatch => write!(
                f,
                "{} {} is declared twice in one batch (by {} and {})",
                self.method, self.template, self.existing, self.candidate
            ),
        }
    }
}

impl std::error::Error for ConflictError {}

/// Check a candidate batch against the committed route table and itself.
///
/// Two routes conflict when they share the same method and URL template;
/// full route equality is a special case of that, so a single check covers
/// both conflict forms. The first conflict found is returned and the whole
/// batch is to be rejected by the caller, including its non-conflicting
/// routes.
///
/// # Errors
///
/// Returns the first [`ConflictError`] found, or `Ok(())` when the batch is
/// admissible.
pub fn check_conflicts(candidates: &[Route], existing: &[Arc<Route>]) -> Result<(), ConflictError> {
    for (i, candidate) in candidates.iter().enumerate() {
        for committed in existing {
            if collides(candidate, committed) {
                return Err(conflict(committed, candidate, ConflictKind::AgainstRegistry));
            }
        }
        for sibling in &candidates[..i] {
            if collides(candidate, sibling) {
                return Err(conflict(sibling, candidate, ConflictKind::WithinBatch));
            }
        }
    }
    Ok(())
}

fn collides(a: &Route, b: &Route) -> bool {
    a.method() == b.method() && a.template().as_str() == b.template().as_str()
}

fn conflict(existing: &Route, candidate: &Route, kind: ConflictKind) -> ConflictError {
    ConflictError {
        method: candidate.method().clone(),
        template: candidate.template().as_str().to_string(),
        existing: existing.handler().clone(),
        candidate: candidate.handler().clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::route;

    #[test]
    fn clean_batch_passes() {
        let existing = vec![Arc::new(
            route(Method::GET).on("/items").to("A", "list").unwrap(),
        )];
        let batch = vec![
            route(Method::POST).on("/items").to("B", "create").unwrap(),
            route(Method::GET).on("/items/{id}").to("B", "show").unwrap(),
        ];
        assert!(check_conflicts(&batch, &existing).is_ok());
    }

    #[test]
    fn same_method_and_template_conflict_even_with_distinct_handlers() {
        let existing = vec![Arc::new(
            route(Method::GET).on("/items").to("A", "list").unwrap(),
        )];
        let batch = vec![route(Method::GET).on("/items").to("B", "list").unwrap()];
        let err = check_conflicts(&batch, &existing).unwrap_err();
        assert_eq!(err.kind, ConflictKind::AgainstRegistry);
        assert_eq!(err.existing, HandlerRef::new("A", "list"));
        assert_eq!(err.candidate, HandlerRef::new("B", "list"));
        assert_eq!(err.template, "/items");
    }

    #[test]
    fn duplicate_within_batch_is_a_conflict() {
        let batch = vec![
            route(Method::GET).on("/x").to("C", "one").unwrap(),
            route(Method::GET).on("/x").to("C", "two").unwrap(),
        ];
        let err = check_conflicts(&batch, &[]).unwrap_err();
        assert_eq!(err.kind, ConflictKind::WithinBatch);
    }

    #[test]
    fn conflict_message_names_both_handlers() {
        let existing = vec![Arc::new(
            route(Method::GET).on("/items").to("A", "list").unwrap(),
        )];
        let batch = vec![route(Method::GET).on("/items").to("B", "index").unwrap()];
        let err = check_conflicts(&batch, &existing).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("A#list"));
        assert!(msg.contains("B#index"));
        assert!(msg.contains("GET /items"));
    }
}
