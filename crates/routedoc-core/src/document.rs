//! The API-description document and its building blocks.
//!
//! The document is plain data: [`crate::ApiRegistry`] owns the one shared
//! instance and is the only place it is mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::components::Components;
use crate::method::HttpMethod;
use crate::operation::Operation;

/// OpenAPI version used when the host supplies none.
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.1";

/// Title used when the host supplies none.
pub const DEFAULT_TITLE: &str = "API Documentation";

/// API version used when the host supplies none.
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// Prefix of every reference into the schema registry.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Media type recorded for every generated request and response body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

// ============================================================================
// Document
// ============================================================================

/// An API-description document: metadata, path table, schema registry.
#[derive(Clone, Debug, Serialize)]
pub struct Document {
    /// OpenAPI version string.
    pub openapi: String,
    /// Top-level metadata.
    pub info: Info,
    /// Path template → per-method operations.
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable schemas referenced from operations.
    #[serde(skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_OPENAPI_VERSION, Info::default())
    }
}

impl Document {
    /// An empty document with the given version and metadata.
    pub fn new(openapi: impl Into<String>, info: Info) -> Self {
        Self {
            openapi: openapi.into(),
            info,
            paths: BTreeMap::new(),
            components: Components::default(),
        }
    }

    /// The operation committed for `(path, method)`, if any.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Total number of committed operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(PathItem::len).sum()
    }

    /// Registry keys referenced from operations that have no schema entry.
    ///
    /// Empty for any document built through [`crate::add_route`].
    pub fn dangling_references(&self) -> Vec<String> {
        let mut dangling = Vec::new();
        for item in self.paths.values() {
            for (_, op) in item.operations() {
                for value in op.as_map().values() {
                    collect_refs(value, &mut dangling);
                }
            }
        }
        dangling.retain(|key| !self.components.contains(key));
        dangling.sort();
        dangling.dedup();
        dangling
    }
}

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(key) = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix(SCHEMA_REF_PREFIX))
            {
                out.push(key.to_string());
            }
            for v in map.values() {
                collect_refs(v, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                collect_refs(v, out);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Document metadata owned by the host application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version (not the OpenAPI version).
    pub version: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Contact details, emitted only when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License, emitted only when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            description: String::new(),
            contact: None,
            license: None,
        }
    }
}

/// Contact information.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Contact name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Contact URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Contact email.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// License information.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    /// License name (e.g. "MIT").
    pub name: String,
    /// License URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

// ============================================================================
// PathItem
// ============================================================================

/// Per-method operations documented for one path template.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PathItem {
    /// GET slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// The operation in `method`'s slot.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
        }
    }

    /// Populated slots, in [`HttpMethod::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|m| self.operation(m).map(|op| (m, op)))
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.operations().count()
    }

    /// `true` when no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Response content
// ============================================================================

/// An inline shape description or a named reference into the registry.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaOrReference {
    /// Inline JSON schema.
    Inline(Value),
    /// Registry key; rendered as `#/components/schemas/<key>`.
    Reference(String),
}

impl SchemaOrReference {
    /// The open-object schema used whenever no registry entry applies.
    pub fn open_object() -> Self {
        Self::Inline(json!({ "type": "object" }))
    }

    /// JSON rendering of this schema slot.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Inline(schema) => schema.clone(),
            Self::Reference(key) => json!({ "$ref": format!("{SCHEMA_REF_PREFIX}{key}") }),
        }
    }
}

/// Media type → schema, as recorded under a response's `content`.
pub type ResponseSpec = BTreeMap<String, SchemaOrReference>;

/// A response spec with a single `application/json` entry.
pub fn json_content(schema: SchemaOrReference) -> ResponseSpec {
    BTreeMap::from([(JSON_MEDIA_TYPE.to_string(), schema)])
}

/// Render a response spec as an OpenAPI `content` object.
pub fn content_value(spec: &ResponseSpec) -> Value {
    let content: Map<String, Value> = spec
        .iter()
        .map(|(media, schema)| (media.clone(), json!({ "schema": schema.to_value() })))
        .collect();
    Value::Object(content)
}
