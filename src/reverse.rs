//! Reverse routing: synthesize a concrete URL from a route and named
//! parameters.
//!
//! The inverse of forward matching. Parameters whose names occur as template
//! placeholders are substituted into the path; the rest overflow into a query
//! string in the order the caller supplied them. Both operations walk the
//! same parsed template, so a URL built here matches the route it came from.

use crate::route::{HandlerRef, Route, Segment};
use std::fmt;

/// No registered route owns the requested handler identity.
///
/// Unlike a forward-match miss, this is a programming or configuration
/// mistake (the handler was never registered, or already detached) and should
/// be treated as fatal by the caller: a link or redirect built against it
/// would misroute every affected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseRouteError {
    /// The handler identity that no live route owns
    pub handler: HandlerRef,
}

impl fmt::Display for ReverseRouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no registered route for handler {}", self.handler)
    }
}

impl std::error::Error for ReverseRouteError {}

/// Build a concrete URL for `route` from ordered (name, value) parameters.
///
/// - With no parameters the template text is returned verbatim, placeholders
///   included.
/// - A parameter matching a `{name}` placeholder is substituted in place.
/// - Remaining parameters become a `?k=v&k2=v2` query string preserving the
///   caller's ordering.
/// - A placeholder with no matching parameter stays verbatim in the output;
///   callers must supply a complete parameter set to get a dispatchable URL.
/// - Values are rendered with `Display` and are **not** URL-escaped here;
///   escaping is the job of the collaborator producing the final response.
#[must_use]
pub fn url_for<K, V>(route: &Route, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: fmt::Display,
{
    if params.is_empty() {
        return route.template().as_str().to_string();
    }

    let mut consumed = vec![false; params.len()];
    let mut url = String::new();

    for segment in route.template().segments() {
        url.push('/');
        match segment {
            Segment::Literal(lit) => url.push_str(lit),
            Segment::Param(name) => {
                if let Some(i) = params.iter().position(|(k, _)| k.as_ref() == name) {
                    consumed[i] = true;
                    url.push_str(&params[i].1.to_string());
                } else {
                    // Dangling placeholder: left verbatim, documented contract.
                    url.push('{');
                    url.push_str(name);
                    url.push('}');
                }
            }
        }
    }
    if url.is_empty() {
        url.push('/');
    }

    let mut first_overflow = true;
    for (i, (key, value)) in params.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        url.push(if first_overflow { '?' } else { '&' });
        first_overflow = false;
        url.push_str(key.as_ref());
        url.push('=');
        url.push_str(&value.to_string());
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::route;
    use http::Method;

    fn user_route() -> Route {
        route(Method::GET)
            .on("/user/{id}/{email}")
            .to("UserController", "dashboard")
            .unwrap()
    }

    #[test]
    fn substitutes_and_overflows() {
        let url = url_for(
            &user_route(),
            &[("id", "42"), ("email", "a@b.com"), ("sort", "asc")],
        );
        assert_eq!(url, "/user/42/a@b.com?sort=asc");
    }

    #[test]
    fn empty_params_return_template_verbatim() {
        let url = url_for(&user_route(), &[] as &[(&str, &str)]);
        assert_eq!(url, "/user/{id}/{email}");
    }

    #[test]
    fn missing_placeholder_stays_verbatim() {
        let url = url_for(&user_route(), &[("id", "42")]);
        assert_eq!(url, "/user/42/{email}");
    }

    #[test]
    fn root_template_with_only_overflow() {
        let r = route(Method::GET).on("/").to("Home", "index").unwrap();
        assert_eq!(url_for(&r, &[("page", "2")]), "/?page=2");
    }

    #[test]
    fn display_values_are_rendered() {
        let r = route(Method::GET).on("/page/{n}").to("P", "show").unwrap();
        assert_eq!(url_for(&r, &[("n", 7u32)]), "/page/7");
    }
}
