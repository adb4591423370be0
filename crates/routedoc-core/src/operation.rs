//! Operation records and caller-supplied operation fragments.
//!
//! Both are plain JSON objects so that the merge policy in [`crate::merge`]
//! can treat every field uniformly, whatever OpenAPI keyword it carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The documented description of one HTTP method at one path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operation(Map<String, Value>);

impl Operation {
    /// Wrap an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// The `operationId` field, if set.
    pub fn operation_id(&self) -> Option<&str> {
        self.0.get("operationId").and_then(Value::as_str)
    }

    /// The `responses` map, keyed by status code.
    pub fn responses(&self) -> Option<&Map<String, Value>> {
        self.0.get("responses").and_then(Value::as_object)
    }

    /// A single response by status code (e.g. `"200"`).
    pub fn response(&self, status: &str) -> Option<&Value> {
        self.responses().and_then(|r| r.get(status))
    }

    /// Any top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// A caller-supplied override for the generated operation.
///
/// Fields left unset defer to earlier fragments and then to the generated
/// defaults. A JSON `null` counts as unset.
///
/// # Example
///
/// ```rust
/// use routedoc_core::PartialOperation;
/// use serde_json::json;
///
/// let patch = PartialOperation::new()
///     .summary("Fetch a user")
///     .tag("users")
///     .response("404", json!({ "description": "No such user" }));
///
/// assert_eq!(patch.get("summary"), Some(&json!("Fetch a user")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialOperation(Map<String, Value>);

impl PartialOperation {
    /// An empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary top-level field.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Set `summary`.
    pub fn summary(self, summary: impl Into<String>) -> Self {
        self.field("summary", Value::String(summary.into()))
    }

    /// Set `description`.
    pub fn description(self, description: impl Into<String>) -> Self {
        self.field("description", Value::String(description.into()))
    }

    /// Set `operationId`.
    pub fn operation_id(self, id: impl Into<String>) -> Self {
        self.field("operationId", Value::String(id.into()))
    }

    /// Set `deprecated`.
    pub fn deprecated(self, deprecated: bool) -> Self {
        self.field("deprecated", Value::Bool(deprecated))
    }

    /// Append a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = Value::String(tag.into());
        match self.0.get_mut("tags") {
            Some(Value::Array(tags)) => tags.push(tag),
            _ => {
                self.0.insert("tags".to_string(), Value::Array(vec![tag]));
            }
        }
        self
    }

    /// Set one entry of `responses`.
    pub fn response(mut self, status: impl Into<String>, response: Value) -> Self {
        match self.0.get_mut("responses") {
            Some(Value::Object(responses)) => {
                responses.insert(status.into(), response);
            }
            _ => {
                let mut responses = Map::new();
                responses.insert(status.into(), response);
                self.0
                    .insert("responses".to_string(), Value::Object(responses));
            }
        }
        self
    }

    /// Any top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Consume into the underlying object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for PartialOperation {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for PartialOperation {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(Error::InvalidOperation("null")),
            Value::Bool(_) => Err(Error::InvalidOperation("a boolean")),
            Value::Number(_) => Err(Error::InvalidOperation("a number")),
            Value::String(_) => Err(Error::InvalidOperation("a string")),
            Value::Array(_) => Err(Error::InvalidOperation("an array")),
        }
    }
}
