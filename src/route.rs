//! Route model and URL template grammar.
//!
//! A [`Route`] is an immutable (method, URL template, handler identity)
//! triple describing one reachable endpoint. The URL template is parsed once
//! at construction into a list of [`Segment`]s; both forward matching and
//! reverse-URL synthesis walk that same parsed representation, so the two
//! inverse operations cannot drift apart.
//!
//! ## Template grammar
//!
//! A template is a `/`-separated path where each segment is either a literal
//! token or a `{name}` placeholder:
//!
//! ```text
//! /users/{user_id}/posts/{post_id}
//! ```
//!
//! Placeholder names must be unique within one template; malformed templates
//! are rejected here, at construction time, before a route can ever reach the
//! registry.

use http::Method;
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of extracted path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the matching hot path.
/// Uses `SmallVec` to avoid heap allocation for routes with ≤8 params.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// One parsed segment of a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal token that must match a concrete path segment exactly.
    Literal(String),
    /// A `{name}` placeholder matching any single non-empty path segment.
    Param(String),
}

/// Error raised when a URL template fails to parse.
///
/// Returned by [`UrlTemplate::parse`] (and therefore by [`Route::new`] and
/// the [`RouteBuilder`]). A route with a malformed template never reaches
/// the registry or the conflict detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template does not start with `/`.
    MissingLeadingSlash {
        /// The offending template string
        template: String,
    },
    /// A placeholder has no name (`{}`).
    EmptyPlaceholder {
        /// The offending template string
        template: String,
    },
    /// A segment opens a placeholder without closing it, or mixes literal
    /// text with braces (e.g., `{id` or `user-{id}`).
    MalformedPlaceholder {
        /// The offending template string
        template: String,
        /// The segment that failed to parse
        segment: String,
    },
    /// The same placeholder name appears twice in one template.
    DuplicatePlaceholder {
        /// The offending template string
        template: String,
        /// The repeated placeholder name
        name: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MissingLeadingSlash { template } => {
                write!(f, "url template '{template}' must start with '/'")
            }
            TemplateError::EmptyPlaceholder { template } => {
                write!(f, "url template '{template}' contains an empty placeholder")
            }
            TemplateError::MalformedPlaceholder { template, segment } => {
                write!(
                    f,
                    "url template '{template}' has a malformed placeholder segment '{segment}'"
                )
            }
            TemplateError::DuplicatePlaceholder { template, name } => {
                write!(
                    f,
                    "url template '{template}' declares placeholder '{{{name}}}' more than once"
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// A URL template parsed into literal and placeholder segments.
///
/// Parsing happens exactly once, here; the matcher and the reverse router
/// both walk [`UrlTemplate::segments`] rather than re-inspecting the raw
/// string per request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse a template string such as `/users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the template does not start with `/`,
    /// contains an empty or malformed placeholder, or repeats a placeholder
    /// name.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        if !raw.starts_with('/') {
            return Err(TemplateError::MissingLeadingSlash {
                template: raw.to_string(),
            });
        }

        let mut segments = Vec::new();
        for part in raw.split('/').filter(|s| !s.is_empty()) {
            if part.starts_with('{') && part.ends_with('}') && part.len() >= 2 {
                let name = &part[1..part.len() - 1];
                if name.is_empty() {
                    return Err(TemplateError::EmptyPlaceholder {
                        template: raw.to_string(),
                    });
                }
                if name.contains(['{', '}']) {
                    return Err(TemplateError::MalformedPlaceholder {
                        template: raw.to_string(),
                        segment: part.to_string(),
                    });
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(n) if n == name))
                {
                    return Err(TemplateError::DuplicatePlaceholder {
                        template: raw.to_string(),
                        name: name.to_string(),
                    });
                }
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains(['{', '}']) {
                return Err(TemplateError::MalformedPlaceholder {
                    template: raw.to_string(),
                    segment: part.to_string(),
                });
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The original template text, e.g. `/users/{id}`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segment list walked by matching and reverse substitution.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in template order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Whether `name` occurs as a `{name}` placeholder in this template.
    #[must_use]
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Param(n) if n == name))
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Opaque handler identity: a (controller, action) pair.
///
/// The registry compares handler references for equality and hands them back
/// for reverse lookup; it never invokes them. Dispatching the actual handler
/// is the HTTP collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    controller: String,
    action: String,
}

impl HandlerRef {
    /// Create a handler reference from controller and action names.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Controller (owning type) name.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action (method) name within the controller.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller, self.action)
    }
}

/// An immutable route: HTTP method, URL template, handler identity.
///
/// Two routes are equal iff all three parts are equal. The registry
/// additionally enforces, at attach time, that no two *distinct* live routes
/// share the same (method, template) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    method: Method,
    template: UrlTemplate,
    handler: HandlerRef,
}

impl Route {
    /// Build a route, parsing and validating the URL template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] when the template is malformed; see
    /// [`UrlTemplate::parse`].
    pub fn new(method: Method, template: &str, handler: HandlerRef) -> Result<Self, TemplateError> {
        Ok(Self {
            method,
            template: UrlTemplate::parse(template)?,
            handler,
        })
    }

    /// HTTP method this route answers to.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The parsed URL template.
    #[must_use]
    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// The handler identity owning this route.
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.template, self.handler)
    }
}

/// Start building a route for the given method.
///
/// Fluent construction mirroring how controllers declare routes:
///
/// ```
/// use http::Method;
/// use wayfinder::route;
///
/// let r = route(Method::GET).on("/user/{id}").to("UserController", "show")?;
/// assert_eq!(r.template().as_str(), "/user/{id}");
/// # Ok::<(), wayfinder::TemplateError>(())
/// ```
#[must_use]
pub fn route(method: Method) -> RouteBuilder {
    RouteBuilder {
        method,
        template: String::new(),
    }
}

/// Builder returned by [`route`]; finish with [`RouteBuilder::to`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    method: Method,
    template: String,
}

impl RouteBuilder {
    /// Set the URL template.
    #[must_use]
    pub fn on(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Bind the handler identity and build the [`Route`].
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] when the template is malformed or was
    /// never set.
    pub fn to(self, controller: &str, action: &str) -> Result<Route, TemplateError> {
        Route::new(self.method, &self.template, HandlerRef::new(controller, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_and_placeholder_segments() {
        let t = UrlTemplate::parse("/users/{id}/posts").unwrap();
        assert_eq!(
            t.segments(),
            &[
                Segment::Literal("users".into()),
                Segment::Param("id".into()),
                Segment::Literal("posts".into()),
            ]
        );
        assert_eq!(t.placeholders(), vec!["id"]);
        assert!(t.has_placeholder("id"));
        assert!(!t.has_placeholder("posts"));
    }

    #[test]
    fn root_template_has_no_segments() {
        let t = UrlTemplate::parse("/").unwrap();
        assert!(t.segments().is_empty());
        assert_eq!(t.as_str(), "/");
    }

    #[test]
    fn rejects_missing_leading_slash() {
        assert!(matches!(
            UrlTemplate::parse("users/{id}"),
            Err(TemplateError::MissingLeadingSlash { .. })
        ));
    }

    #[test]
    fn rejects_empty_placeholder() {
        assert!(matches!(
            UrlTemplate::parse("/users/{}"),
            Err(TemplateError::EmptyPlaceholder { .. })
        ));
    }

    #[test]
    fn rejects_malformed_placeholder() {
        assert!(matches!(
            UrlTemplate::parse("/users/{id"),
            Err(TemplateError::MalformedPlaceholder { .. })
        ));
        assert!(matches!(
            UrlTemplate::parse("/users/x{id}"),
            Err(TemplateError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_placeholder_names() {
        let err = UrlTemplate::parse("/a/{id}/b/{id}").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::DuplicatePlaceholder { ref name, .. } if name == "id"
        ));
    }

    #[test]
    fn builder_constructs_full_route() {
        let r = route(Method::POST)
            .on("/items/{id}")
            .to("ItemController", "update")
            .unwrap();
        assert_eq!(r.method(), &Method::POST);
        assert_eq!(r.template().as_str(), "/items/{id}");
        assert_eq!(r.handler(), &HandlerRef::new("ItemController", "update"));
        assert_eq!(r.to_string(), "POST /items/{id} -> ItemController#update");
    }

    #[test]
    fn builder_without_template_fails() {
        assert!(route(Method::GET).to("C", "a").is_err());
    }

    #[test]
    fn route_equality_covers_all_three_parts() {
        let a = route(Method::GET).on("/x").to("C", "a").unwrap();
        let b = route(Method::GET).on("/x").to("C", "a").unwrap();
        let c = route(Method::GET).on("/x").to("C", "b").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
