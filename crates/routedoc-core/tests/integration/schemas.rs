//! Schema registry behavior of `add_route`.

use routedoc_core::{
    ApiRegistry, Document, HttpMethod, RouteDescriptor, SchemaOrReference, TypeDescriptor,
    add_route,
};
use serde_json::{Value, json};

use crate::common::{CreateUser, RecordingRouter, User};

mod billing {
    use schemars::JsonSchema;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    pub struct Address {
        pub iban: String,
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    pub struct Invoice {
        pub total: u64,
        pub address: Address,
    }
}

mod shipping {
    use schemars::JsonSchema;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    pub struct Address {
        pub street: String,
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    pub struct Parcel {
        pub weight: u32,
        pub address: Address,
    }
}

const REF_PREFIX: &str = "#/components/schemas/";

fn response_schema(registry: &ApiRegistry, path: &str, method: HttpMethod) -> Value {
    let doc = registry.snapshot();
    let op = doc.operation(path, method).unwrap();
    op.response("200").unwrap()["content"]["application/json"]["schema"].clone()
}

/// Registry key a `$ref` schema points at.
fn ref_key(schema: &Value) -> String {
    schema["$ref"]
        .as_str()
        .and_then(|r| r.strip_prefix(REF_PREFIX))
        .unwrap()
        .to_string()
}

fn get_route<T: schemars::JsonSchema + 'static>(
    registry: &ApiRegistry,
    router: &mut RecordingRouter,
    path: &str,
) {
    add_route(
        registry,
        router,
        RouteDescriptor::new(HttpMethod::Get, path, "h").with_response(TypeDescriptor::of::<T>()),
    );
}

/// Every `$ref` inside a registered schema names a registered schema.
fn assert_component_refs_resolve(doc: &Document) {
    fn walk(value: &Value, doc: &Document) {
        match value {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                    let key = reference.strip_prefix(REF_PREFIX).unwrap();
                    assert!(doc.components.contains(key), "dangling {reference}");
                }
                map.values().for_each(|v| walk(v, doc));
            }
            Value::Array(items) => items.iter().for_each(|v| walk(v, doc)),
            _ => {}
        }
    }
    doc.components.schemas().values().for_each(|v| walk(v, doc));
    assert!(doc.dangling_references().is_empty());
}

/// Address entry referenced by the `address` property of payload `key`.
fn address_of<'a>(doc: &'a Document, key: &str) -> &'a Value {
    let payload = doc.components.get(key).unwrap();
    doc.components
        .get(&ref_key(&payload["properties"]["address"]))
        .unwrap()
}

#[test]
fn test_shared_response_type_registers_once() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/users/:id", "get")
            .with_response(TypeDescriptor::of::<User>()),
    );
    let schemas_after_first = registry.read(|doc| doc.components.len());
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/me", "me").with_response(TypeDescriptor::of::<User>()),
    );

    assert_eq!(registry.read(|doc| doc.components.len()), schemas_after_first);
    let first = response_schema(&registry, "/users/:id", HttpMethod::Get);
    let second = response_schema(&registry, "/me", HttpMethod::Get);
    assert_eq!(first, second);
    assert!(first["$ref"].as_str().unwrap().starts_with("#/components/schemas/"));
}

#[test]
fn test_nested_types_resolve() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Post, "/users", "create").typed::<CreateUser, User>(),
    );

    let doc = registry.snapshot();
    assert!(doc.components.contains("Address"));
    assert!(doc.dangling_references().is_empty());
}

#[test]
fn test_interface_response_falls_back() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/any", "h")
            .with_response(TypeDescriptor::of::<serde_json::Value>()),
    );
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/nothing", "h").with_response(TypeDescriptor::invalid()),
    );
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/boxed", "h").with_response(
            TypeDescriptor::pointer_to(TypeDescriptor::interface("dyn Any")),
        ),
    );

    assert!(registry.read(|doc| doc.components.is_empty()));
    for path in ["/any", "/nothing", "/boxed"] {
        assert_eq!(
            response_schema(&registry, path, HttpMethod::Get),
            SchemaOrReference::open_object().to_value(),
            "{path}"
        );
    }
}

#[test]
fn test_colliding_type_paths_degrade() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/a", "a")
            .with_response(TypeDescriptor::of::<User>().with_path("shared.Payload")),
    );
    add_route(
        &registry,
        &mut router,
        RouteDescriptor::new(HttpMethod::Get, "/b", "b")
            .with_response(TypeDescriptor::of::<CreateUser>().with_path("shared.Payload")),
    );

    assert_eq!(
        response_schema(&registry, "/a", HttpMethod::Get),
        json!({ "$ref": "#/components/schemas/shared.Payload_json" })
    );
    assert_eq!(
        response_schema(&registry, "/b", HttpMethod::Get),
        json!({ "type": "object" })
    );
    assert_eq!(registry.read(|doc| doc.operation_count()), 2);
}

#[test]
fn test_same_named_types_from_different_modules() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    get_route::<billing::Invoice>(&registry, &mut router, "/invoices/:id");
    get_route::<shipping::Parcel>(&registry, &mut router, "/parcels/:id");

    let doc = registry.snapshot();
    let invoice = ref_key(&response_schema(&registry, "/invoices/:id", HttpMethod::Get));
    let parcel = ref_key(&response_schema(&registry, "/parcels/:id", HttpMethod::Get));

    let billing_address = address_of(&doc, &invoice);
    assert!(billing_address["properties"].get("iban").is_some());
    assert!(billing_address["properties"].get("street").is_none());

    let shipping_address = address_of(&doc, &parcel);
    assert!(shipping_address["properties"].get("street").is_some());
    assert!(shipping_address["properties"].get("iban").is_none());

    assert_eq!(doc.components.len(), 4);
    assert_component_refs_resolve(&doc);
}

#[test]
fn test_type_nested_then_registered_directly_has_one_entry() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    get_route::<billing::Invoice>(&registry, &mut router, "/invoices/:id");
    get_route::<billing::Address>(&registry, &mut router, "/addresses/:id");

    let doc = registry.snapshot();
    let invoice = ref_key(&response_schema(&registry, "/invoices/:id", HttpMethod::Get));
    let address = ref_key(&response_schema(&registry, "/addresses/:id", HttpMethod::Get));

    assert_eq!(doc.components.len(), 2);
    assert!(address.ends_with("billing.Address_json"));
    assert_eq!(address_of(&doc, &invoice), doc.components.get(&address).unwrap());
    assert_component_refs_resolve(&doc);
}

#[test]
fn test_type_registered_directly_then_nested_has_one_entry() {
    let registry = ApiRegistry::new();
    let mut router = RecordingRouter::default();

    get_route::<billing::Address>(&registry, &mut router, "/addresses/:id");
    get_route::<billing::Invoice>(&registry, &mut router, "/invoices/:id");

    let doc = registry.snapshot();
    let invoice = ref_key(&response_schema(&registry, "/invoices/:id", HttpMethod::Get));
    let address = ref_key(&response_schema(&registry, "/addresses/:id", HttpMethod::Get));

    assert_eq!(doc.components.len(), 2);
    assert_eq!(
        doc.components.get(&invoice).unwrap()["properties"]["address"]["$ref"],
        json!(format!("{REF_PREFIX}{address}"))
    );
    assert_component_refs_resolve(&doc);
}
