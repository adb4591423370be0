//! Schemars-backed schema registry.
//!
//! Route payload types are keyed by `<sanitized type path>_<encoding>`. The
//! first type to claim a key owns it: registering the same type again returns
//! the existing key, while a different type deriving the same key is a
//! collision.
//!
//! Types that only appear inside a payload keep the name schemars gives them
//! (`Address`). A nested definition reuses the entry with the same schema name
//! and body; when the name is taken by a different body it is stored under a
//! numbered name (`Address2`) and references are rewritten to match. A nested
//! entry moves to the payload key once its type is registered as a payload.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

use schemars::generate::SchemaSettings;
use serde::Serialize;
use serde_json::Value;

use crate::document::SCHEMA_REF_PREFIX;
use crate::error::SchemaError;
use crate::schema::{SchemaFn, SchemaRegistry, TypeDescriptor, TypeKind};

/// Validation discriminator under which derived `required` lists are kept.
pub const BINDING_VALIDATION: &str = "binding";

/// Reusable schemas of a [`crate::Document`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct Components {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    schemas: BTreeMap<String, Value>,
    #[serde(skip)]
    owners: HashMap<String, TypeId>,
    /// Schema name each entry was derived under.
    #[serde(skip)]
    names: HashMap<String, String>,
}

/// Entries a registration adds for nested definitions, by key.
type NewEntries = BTreeMap<String, (String, Value)>;

impl Components {
    /// All registered schemas by key.
    pub fn schemas(&self) -> &BTreeMap<String, Value> {
        &self.schemas
    }

    /// One schema by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.schemas.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.schemas.contains_key(key)
    }

    /// Number of registered schemas, nested definitions included.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Keys of entries derived under `name` with exactly `body`.
    fn entries_like<'a>(
        &'a self,
        name: &'a str,
        body: &'a Value,
    ) -> impl Iterator<Item = &'a String> + 'a {
        self.schemas
            .iter()
            .filter(move |&(key, value)| {
                value == body && self.names.get(key).is_some_and(|n| n == name)
            })
            .map(|(key, _)| key)
    }

    /// Choose a registry key for every definition schemars generated next to
    /// the payload `key`. Returns the generated-name to key mapping and the
    /// definitions that need a new entry.
    fn place_definitions(
        &self,
        key: &str,
        name: &str,
        schema: &Value,
        mut pending: BTreeMap<String, Value>,
    ) -> (HashMap<String, String>, NewEntries) {
        let mut renames = HashMap::new();
        let mut added = NewEntries::new();

        while let Some(def_name) = next_definition(&pending) {
            let Some(body) = pending.remove(&def_name) else {
                break;
            };
            let mut candidate = body.clone();
            rename_refs(&mut candidate, &renames);

            let target = if def_name == name && candidate == *schema {
                // recursive payload referencing itself
                key.to_string()
            } else if let Some(existing) = self.entries_like(&def_name, &candidate).next() {
                existing.clone()
            } else {
                let fresh = self.fresh_key(&def_name, key, &added);
                added.insert(fresh.clone(), (def_name.clone(), body));
                fresh
            };
            renames.insert(def_name, target);
        }

        (renames, added)
    }

    /// `name`, or `name` with the lowest free numeric suffix.
    fn fresh_key(&self, name: &str, reserved: &str, added: &NewEntries) -> String {
        let taken =
            |k: &str| k == reserved || self.schemas.contains_key(k) || added.contains_key(k);
        if !taken(name) {
            return name.to_string();
        }
        (2u32..)
            .map(|i| format!("{name}{i}"))
            .find(|k| !taken(k.as_str()))
            .unwrap_or_default()
    }
}

impl SchemaRegistry for Components {
    fn add_schema(
        &mut self,
        ty: &TypeDescriptor,
        encoding: &str,
        validation: &str,
    ) -> Result<String, SchemaError> {
        let target = ty.innermost();
        let unsupported = || SchemaError::UnsupportedKind {
            path: target.path().to_string(),
            kind: target.kind(),
        };

        if matches!(target.kind(), TypeKind::Interface | TypeKind::Invalid) {
            return Err(unsupported());
        }
        let (Some(generate), Some(type_id), Some(name)) =
            (target.generator(), target.type_id(), target.schema_name())
        else {
            return Err(unsupported());
        };

        let key = schema_key(target.path(), encoding);
        match self.owners.get(&key) {
            Some(owner) if *owner == type_id => return Ok(key),
            Some(_) => return Err(SchemaError::NameCollision { key }),
            None if self.schemas.contains_key(&key) => {
                return Err(SchemaError::NameCollision { key });
            }
            None => {}
        }

        let (mut schema, mut definitions) = derive(generate);
        if validation != BINDING_VALIDATION {
            strip_required(&mut schema);
            definitions.values_mut().for_each(strip_required);
        }

        let (renames, added) = self.place_definitions(&key, name, &schema, definitions);
        rename_refs(&mut schema, &renames);
        let promoted = self
            .entries_like(name, &schema)
            .find(|k| !self.owners.contains_key(*k))
            .cloned();

        for (entry_key, (entry_name, mut body)) in added {
            rename_refs(&mut body, &renames);
            log::debug!("Registered nested schema '{entry_key}'");
            self.schemas.insert(entry_key.clone(), body);
            self.names.insert(entry_key, entry_name);
        }
        self.schemas.insert(key.clone(), schema);
        self.owners.insert(key.clone(), type_id);
        self.names.insert(key.clone(), name.to_string());

        if let Some(old) = promoted {
            self.schemas.remove(&old);
            self.names.remove(&old);
            let moved = HashMap::from([(old.clone(), key.clone())]);
            for value in self.schemas.values_mut() {
                rename_refs(value, &moved);
            }
            log::debug!("Moved nested schema '{old}' to '{key}'");
        }

        log::debug!("Registered schema '{key}' ({})", target.kind());
        Ok(key)
    }
}

/// Schema body and nested definitions of one type, with the OpenAPI 3.0
/// transforms applied to both.
fn derive(generate: SchemaFn) -> (Value, BTreeMap<String, Value>) {
    let mut generator = SchemaSettings::openapi3().into_generator();
    let mut schema = generate(&mut generator);
    for transform in generator.transforms_mut() {
        transform.transform(&mut schema);
    }
    let definitions = generator.take_definitions(true).into_iter().collect();
    (schema.to_value(), definitions)
}

/// Next definition to place: one whose references are all placed, or any
/// definition when only cycles remain.
fn next_definition(pending: &BTreeMap<String, Value>) -> Option<String> {
    pending
        .iter()
        .find(|(_, body)| {
            let mut refs = Vec::new();
            collect_ref_names(body, &mut refs);
            refs.iter().all(|r| !pending.contains_key(r))
        })
        .or_else(|| pending.iter().next())
        .map(|(name, _)| name.clone())
}

fn strip_required(value: &mut Value) {
    match value {
        Value::Object(object) => {
            if object.get("required").is_some_and(Value::is_array) {
                object.remove("required");
            }
            object.values_mut().for_each(strip_required);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_required),
        _ => {}
    }
}

fn ref_name(reference: &str) -> Option<String> {
    reference
        .strip_prefix(SCHEMA_REF_PREFIX)
        .map(|name| name.replace("~1", "/").replace("~0", "~"))
}

fn ref_to(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{}", name.replace('~', "~0").replace('/', "~1"))
}

fn collect_ref_names(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(object) => {
            if let Some(name) = object.get("$ref").and_then(Value::as_str).and_then(ref_name) {
                out.push(name);
            }
            object.values().for_each(|v| collect_ref_names(v, out));
        }
        Value::Array(items) => items.iter().for_each(|v| collect_ref_names(v, out)),
        _ => {}
    }
}

/// Point every `$ref` to a renamed definition at its new key.
fn rename_refs(value: &mut Value, renames: &HashMap<String, String>) {
    match value {
        Value::Object(object) => {
            if let Some(Value::String(reference)) = object.get_mut("$ref")
                && let Some(target) = ref_name(reference).and_then(|n| renames.get(&n))
            {
                *reference = ref_to(target);
            }
            object.values_mut().for_each(|v| rename_refs(v, renames));
        }
        Value::Array(items) => items.iter_mut().for_each(|v| rename_refs(v, renames)),
        _ => {}
    }
}

/// Registry key for a type path and encoding.
///
/// Module separators become dots and anything outside `[A-Za-z0-9._-]`
/// becomes an underscore, so keys are safe inside a JSON pointer.
///
/// ```rust
/// use routedoc_core::components::schema_key;
///
/// assert_eq!(schema_key("app::models::User", "json"), "app.models.User_json");
/// assert_eq!(schema_key("app::Page<app::User>", "json"), "app.Page_app.User__json");
/// ```
pub fn schema_key(path: &str, encoding: &str) -> String {
    let sanitized: String = path
        .replace("::", ".")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_{encoding}")
}
