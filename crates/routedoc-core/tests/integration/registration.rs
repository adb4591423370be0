//! Path-table behavior of `add_route`.

use routedoc_core::{
    ApiRegistry, DocsConfig, Error, HttpMethod, PartialOperation, RouteDescriptor, add_route,
};
use serde_json::json;

use crate::common::RecordingRouter;

#[test]
fn test_every_method_yields_one_entry_and_one_binding() {
    for method in HttpMethod::ALL {
        let registry = ApiRegistry::new();
        let mut router = RecordingRouter::default();

        add_route(
            &registry,
            &mut router,
            RouteDescriptor::new(method, "/things", "handler"),
        );

        assert_eq!(router.bound, vec![(method, "/things".to_string(), "handler")]);
        let doc = registry.snapshot();
        assert_eq!(doc.operation_count(), 1, "{method}");
        assert!(doc.operation("/things", method).is_some(), "{method}");
    }
}

#[test]
fn test_sibling_methods_survive() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users/:id", "get"),
    );
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Post, "/users/:id", "post"),
    );

    let doc = registry.snapshot();
    assert_eq!(doc.paths.len(), 1);
    let item = doc.paths.get("/users/:id").unwrap();
    assert!(item.get.is_some());
    assert!(item.post.is_some());
}

#[test]
fn test_reregistration_replaces_only_that_entry() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users/:id", "v1")
            .with_options([PartialOperation::new().summary("first")]),
    );
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Delete, "/users/:id", "delete"),
    );
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users/:id", "v2")
            .with_options([PartialOperation::new().summary("second")]),
    );

    let doc = registry.snapshot();
    assert_eq!(doc.operation_count(), 2);
    let get = doc.operation("/users/:id", HttpMethod::Get).unwrap();
    assert_eq!(get.get("summary"), Some(&json!("second")));
    assert!(doc.operation("/users/:id", HttpMethod::Delete).is_some());
    assert_eq!(router.bound.len(), 3);
}

#[test]
fn test_override_response_beats_generated() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();
    let custom = json!({ "description": "A single user" });

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users/:id", "h")
            .with_options([PartialOperation::new().response("200", custom.clone())]),
    );

    let doc = registry.snapshot();
    let op = doc.operation("/users/:id", HttpMethod::Get).unwrap();
    assert_eq!(op.response("200"), Some(&custom));
    assert_eq!(op.operation_id(), Some("GET_/users/:id"));
}

#[test]
fn test_group_prefix_joins_document_path() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::at("/api/");

    let action = add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users", "h"),
    );

    assert_eq!(action.path, "/api/users");
    assert_eq!(action.operation_id.as_deref(), Some("GET_/api/users"));
    assert!(registry.snapshot().paths.contains_key("/api/users"));
}

#[test]
fn test_unsupported_method_touches_nothing() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    let result = RouteDescriptor::parse("TRACE", "/debug", "h")
        .map(|route| add_route(&registry, &mut router, route));

    assert!(matches!(result, Err(Error::UnsupportedMethod(_))));
    assert!(router.bound.is_empty());
    assert!(registry.snapshot().paths.is_empty());
}

#[test]
fn test_configured_metadata_is_kept() {
    let config = DocsConfig::from_toml_str("[info]\ntitle = \"Users API\"\n").unwrap();
    let registry = ApiRegistry::from_config(&config);
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users", "h"),
    );

    let value = serde_json::to_value(registry.snapshot()).unwrap();
    assert_eq!(value["openapi"], json!("3.0.1"));
    assert_eq!(value["info"]["title"], json!("Users API"));
    assert!(value["paths"]["/users"]["get"].is_object());
}
