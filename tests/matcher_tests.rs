#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::Method;
use wayfinder::{route, HandlerRef, Route, RouteRegistry, TemplateError};

fn zoo_routes() -> Vec<Route> {
    vec![
        route(Method::GET).on("/").to("Home", "index").unwrap(),
        route(Method::GET).on("/animals").to("Zoo", "list").unwrap(),
        route(Method::POST).on("/animals").to("Zoo", "create").unwrap(),
        route(Method::GET).on("/animals/{id}").to("Zoo", "show").unwrap(),
        route(Method::PUT).on("/animals/{id}").to("Zoo", "update").unwrap(),
        route(Method::DELETE).on("/animals/{id}").to("Zoo", "delete").unwrap(),
        route(Method::GET)
            .on("/animals/{id}/meals/{meal_id}")
            .to("Zoo", "meal")
            .unwrap(),
    ]
}

fn registry() -> RouteRegistry {
    let r = RouteRegistry::new();
    r.attach("zoo", zoo_routes()).expect("attach");
    r
}

fn assert_match(registry: &RouteRegistry, method: Method, path: &str, expected: &str) {
    let m = registry
        .find_for_request(&method, path)
        .unwrap_or_else(|| panic!("expected {method} {path} to match"));
    assert_eq!(m.route.handler().action(), expected);
}

#[test]
fn test_each_method_routes_to_its_own_handler() {
    let registry = registry();
    assert_match(&registry, Method::GET, "/animals", "list");
    assert_match(&registry, Method::POST, "/animals", "create");
    assert_match(&registry, Method::GET, "/animals/12", "show");
    assert_match(&registry, Method::PUT, "/animals/12", "update");
    assert_match(&registry, Method::DELETE, "/animals/12", "delete");
}

#[test]
fn test_root_route() {
    let registry = registry();
    assert_match(&registry, Method::GET, "/", "index");
}

#[test]
fn test_nested_parameters_extracted_in_order() {
    let registry = registry();
    let m = registry
        .find_for_request(&Method::GET, "/animals/5/meals/9")
        .expect("match");
    assert_eq!(m.get_path_param("id"), Some("5"));
    assert_eq!(m.get_path_param("meal_id"), Some("9"));
    assert_eq!(m.path_params.len(), 2);
}

#[test]
fn test_segment_count_must_match() {
    let registry = registry();
    assert!(registry.find_for_request(&Method::GET, "/animals/5/meals").is_none());
    assert!(registry
        .find_for_request(&Method::GET, "/animals/5/meals/9/extra")
        .is_none());
}

#[test]
fn test_unknown_method_or_path_is_not_found() {
    let registry = registry();
    assert!(registry.find_for_request(&Method::PATCH, "/animals/5").is_none());
    assert!(registry.find_for_request(&Method::GET, "/plants").is_none());
}

#[test]
fn test_placeholder_does_not_span_segments() {
    let registry = registry();
    // `{id}` matches one segment only; a slash in the value is a different path.
    assert!(registry.find_for_request(&Method::GET, "/animals/a/b").is_none());
}

#[test]
fn test_duplicate_slashes_are_normalized() {
    let registry = registry();
    assert_match(&registry, Method::GET, "//animals//12", "show");
}

#[test]
fn test_malformed_template_never_reaches_the_registry() {
    let err = route(Method::GET)
        .on("/a/{id}/b/{id}")
        .to("Zoo", "broken")
        .expect_err("duplicate placeholder");
    assert!(matches!(err, TemplateError::DuplicatePlaceholder { .. }));
}

#[test]
fn test_overlapping_templates_resolve_to_first_registered() {
    let registry = RouteRegistry::new();
    registry
        .attach(
            "static",
            vec![route(Method::GET).on("/files/latest").to("Files", "latest").unwrap()],
        )
        .expect("attach static");
    registry
        .attach(
            "dynamic",
            vec![route(Method::GET).on("/files/{name}").to("Files", "by_name").unwrap()],
        )
        .expect("attach dynamic");

    let m = registry
        .find_for_request(&Method::GET, "/files/latest")
        .expect("match");
    assert_eq!(m.route.handler(), &HandlerRef::new("Files", "latest"));

    let m = registry
        .find_for_request(&Method::GET, "/files/report")
        .expect("match");
    assert_eq!(m.route.handler(), &HandlerRef::new("Files", "by_name"));
    assert_eq!(m.get_path_param("name"), Some("report"));
}
