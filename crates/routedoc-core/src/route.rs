//! Documented route registration.
//!
//! [`add_route`] is the one entry point router adapters go through: it binds
//! the endpoint with the router, then resolves payload schemas, merges caller
//! overrides over the generated operation and commits the result, all under
//! the registry lock.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::components::Components;
use crate::dispatch::{RouteBinder, dispatch};
use crate::document::{SchemaOrReference, content_value, json_content};
use crate::error::Result;
use crate::merge::merge;
use crate::method::HttpMethod;
use crate::operation::{Operation, PartialOperation};
use crate::path_table::{commit_slot, join_paths};
use crate::registry::ApiRegistry;
use crate::resolver::{resolve_content, resolve_schema};
use crate::schema::TypeDescriptor;

/// Everything needed to register one documented route.
#[derive(Debug)]
pub struct RouteDescriptor<E> {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template relative to the router's base path (`/users/:id`).
    pub path: String,
    /// The router's representation of the handler chain.
    pub endpoint: E,
    /// Caller overrides, applied in order.
    pub overrides: Vec<PartialOperation>,
    /// Request payload type, if documented.
    pub request: Option<TypeDescriptor>,
    /// Response payload type, if documented.
    pub response: Option<TypeDescriptor>,
}

impl<E> RouteDescriptor<E> {
    /// An untyped route with no overrides.
    pub fn new(method: HttpMethod, path: impl Into<String>, endpoint: E) -> Self {
        Self {
            method,
            path: path.into(),
            endpoint,
            overrides: Vec::new(),
            request: None,
            response: None,
        }
    }

    /// Like [`Self::new`], with the method given as a string.
    ///
    /// Methods outside [`HttpMethod::ALL`] are rejected with
    /// [`crate::Error::UnsupportedMethod`]; nothing is bound or documented.
    pub fn parse(method: &str, path: impl Into<String>, endpoint: E) -> Result<Self> {
        let path = path.into();
        match method.parse::<HttpMethod>() {
            Ok(method) => Ok(Self::new(method, path, endpoint)),
            Err(e) => {
                log::warn!("Skipping route {path}: {e}");
                Err(e)
            }
        }
    }

    /// Append override fragments.
    pub fn with_options(mut self, overrides: impl IntoIterator<Item = PartialOperation>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Document request and response bodies from Rust types.
    pub fn typed<Req, Res>(self) -> Self
    where
        Req: JsonSchema + 'static,
        Res: JsonSchema + 'static,
    {
        self.with_request(TypeDescriptor::of::<Req>())
            .with_response(TypeDescriptor::of::<Res>())
    }

    /// Set the request payload descriptor.
    pub fn with_request(mut self, ty: TypeDescriptor) -> Self {
        self.request = Some(ty);
        self
    }

    /// Set the response payload descriptor.
    pub fn with_response(mut self, ty: TypeDescriptor) -> Self {
        self.response = Some(ty);
        self
    }
}

/// Summary of a committed route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteAction {
    /// HTTP method.
    pub method: HttpMethod,
    /// Full path template, base path included.
    pub path: String,
    /// Effective operation id after overrides.
    pub operation_id: Option<String>,
}

/// Bind `route` with `binder` and document it in `registry`.
///
/// Exactly one router binding and one path-table entry result. Schema
/// failures never abort registration; they degrade to open-object content.
pub fn add_route<B>(
    registry: &ApiRegistry,
    binder: &mut B,
    route: RouteDescriptor<B::Endpoint>,
) -> RouteAction
where
    B: RouteBinder + ?Sized,
{
    let RouteDescriptor {
        method,
        path,
        endpoint,
        overrides,
        request,
        response,
    } = route;

    let full_path = join_paths(binder.base_path(), &path);
    let slot = dispatch(binder, method, &path, endpoint);

    let operation = registry.update(|doc| {
        let generated = generated_operation(
            &mut doc.components,
            method,
            &full_path,
            request.as_ref(),
            response.as_ref(),
        );
        let operation = merge(overrides, generated);
        commit_slot(doc, &full_path, slot, operation.clone());
        operation
    });

    let operation_id = operation.operation_id().map(str::to_string);
    log::debug!(
        "Documented {method} {full_path} ({})",
        operation_id.as_deref().unwrap_or("no operationId")
    );

    RouteAction {
        method,
        path: full_path,
        operation_id,
    }
}

/// The operation recorded when the caller overrides nothing.
fn generated_operation(
    components: &mut Components,
    method: HttpMethod,
    full_path: &str,
    request: Option<&TypeDescriptor>,
    response: Option<&TypeDescriptor>,
) -> Operation {
    let content = resolve_content(components, response);

    let mut op = Map::new();
    op.insert(
        "operationId".to_string(),
        Value::String(format!("{method}_{full_path}")),
    );
    op.insert(
        "responses".to_string(),
        json!({ "200": { "description": "OK", "content": content_value(&content) } }),
    );

    if method.accepts_body()
        && let Some(schema @ SchemaOrReference::Reference(_)) = resolve_schema(components, request)
    {
        op.insert(
            "requestBody".to_string(),
            json!({ "required": true, "content": content_value(&json_content(schema)) }),
        );
    }

    Operation::from_map(op)
}
