//! Matcher core - hot path for request routing.

use crate::route::{ParamVec, Route, Segment};
use http::Method;
use std::sync::Arc;

/// Result of successfully matching a request path to a route.
///
/// Contains the matched route and the path parameters extracted from the
/// concrete URL. Parameters are stack-allocated for routes with ≤8
/// placeholders to keep the hot path free of heap allocation.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (`Arc` to avoid copying out of the table)
    pub route: Arc<Route>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `("id", "123")`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get an extracted path parameter by name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Match a (method, path) pair against an ordered route table.
///
/// Routes are tried in slice order and the first match wins, which gives the
/// registry its first-registered-wins tie-break for overlapping templates.
/// Pure function of its inputs; `None` is the expected no-match outcome, not
/// an error.
///
/// # Example
///
/// ```rust,ignore
/// if let Some(m) = match_route(&snapshot, &Method::GET, "/users/123") {
///     println!("handler: {}", m.route.handler());
///     println!("user id: {:?}", m.get_path_param("id"));
/// }
/// ```
#[must_use]
pub fn match_route(routes: &[Arc<Route>], method: &Method, path: &str) -> Option<RouteMatch> {
    let concrete: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    for route in routes {
        if route.method() != method {
            continue;
        }
        if let Some(path_params) = capture(route.template().segments(), &concrete) {
            return Some(RouteMatch {
                route: Arc::clone(route),
                path_params,
            });
        }
    }
    None
}

/// Walk template segments against concrete path segments, extracting
/// placeholder values. `None` on any mismatch, including segment count.
fn capture(template: &[Segment], concrete: &[&str]) -> Option<ParamVec> {
    if template.len() != concrete.len() {
        return None;
    }

    let mut params = ParamVec::new();
    for (segment, part) in template.iter().zip(concrete) {
        match segment {
            Segment::Literal(lit) => {
                if lit != part {
                    return None;
                }
            }
            Segment::Param(name) => params.push((name.clone(), (*part).to_string())),
        }
    }
    Some(params)
}
