//! Payload type descriptors and the schema registry seam.
//!
//! A [`TypeDescriptor`] is what route registration knows about a request or
//! response payload: a closed [`TypeKind`], a stable type path used to derive
//! registry keys, and (for real Rust types) the schemars generator for its
//! shape. Eligibility for a reusable registry entry is a pure function of the
//! descriptor; see [`is_schema_eligible`].

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

use schemars::generate::SchemaSettings;
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde_json::Value;

use crate::error::SchemaError;

/// Generates the schema body of one type.
pub type SchemaFn = fn(&mut SchemaGenerator) -> Schema;

// ============================================================================
// TypeKind
// ============================================================================

/// Closed classification of payload types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Record with named fields.
    Struct,
    /// Tagged or untagged union, or a closed set of values.
    Enum,
    /// Array-like collection.
    Sequence,
    /// String-keyed dictionary.
    Map,
    /// String, number, or boolean.
    Scalar,
    /// One level of indirection around another descriptor.
    Pointer,
    /// Placeholder accepting anything (e.g. `serde_json::Value`).
    Interface,
    /// No payload at all (e.g. `()`).
    Invalid,
}

impl TypeKind {
    /// Classify a derived schema body.
    pub fn of_schema(schema: &Value) -> Self {
        let Value::Object(object) = schema else {
            // `true` accepts anything, `false` accepts nothing
            return if schema.as_bool() == Some(true) {
                Self::Interface
            } else {
                Self::Invalid
            };
        };

        if object.contains_key("enum")
            || object.contains_key("oneOf")
            || object.contains_key("anyOf")
            || object.contains_key("const")
        {
            return Self::Enum;
        }

        let ty = match object.get("type") {
            Some(Value::String(ty)) => Some(ty.as_str()),
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null")
                .or(Some("null")),
            _ => None,
        };

        match ty {
            Some("object") => {
                if !object.contains_key("properties") && object.contains_key("additionalProperties")
                {
                    Self::Map
                } else {
                    Self::Struct
                }
            }
            Some("array") => Self::Sequence,
            Some("null") => Self::Invalid,
            Some(_) => Self::Scalar,
            None if object.contains_key("$ref") || object.contains_key("allOf") => Self::Struct,
            None => Self::Interface,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::Scalar => "scalar",
            Self::Pointer => "pointer",
            Self::Interface => "interface",
            Self::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

// ============================================================================
// TypeDescriptor
// ============================================================================

/// What route registration knows about a payload type.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    kind: TypeKind,
    path: Cow<'static, str>,
    type_id: Option<TypeId>,
    name: Option<Cow<'static, str>>,
    generator: Option<SchemaFn>,
    pointee: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Describe a Rust type through its derived schema.
    ///
    /// ```rust
    /// use routedoc_core::{TypeDescriptor, TypeKind};
    ///
    /// assert_eq!(TypeDescriptor::of::<Vec<String>>().kind(), TypeKind::Sequence);
    /// assert_eq!(TypeDescriptor::of::<serde_json::Value>().kind(), TypeKind::Interface);
    /// assert_eq!(TypeDescriptor::of::<()>().kind(), TypeKind::Invalid);
    /// ```
    pub fn of<T: JsonSchema + 'static>() -> Self {
        // Classified from the untransformed body: OpenAPI 3.0 rewrites a
        // `null` type into `nullable`.
        let mut generator = SchemaSettings::openapi3().into_generator();
        let body = T::json_schema(&mut generator);
        Self {
            kind: TypeKind::of_schema(body.as_value()),
            path: Cow::Borrowed(std::any::type_name::<T>()),
            type_id: Some(TypeId::of::<T>()),
            name: Some(T::schema_name()),
            generator: Some(T::json_schema as SchemaFn),
            pointee: None,
        }
    }

    /// One level of indirection around `pointee`.
    pub fn pointer_to(pointee: TypeDescriptor) -> Self {
        Self {
            kind: TypeKind::Pointer,
            path: pointee.path.clone(),
            type_id: None,
            name: None,
            generator: None,
            pointee: Some(Box::new(pointee)),
        }
    }

    /// A placeholder type that accepts anything.
    pub fn interface(path: impl Into<Cow<'static, str>>) -> Self {
        Self::opaque(TypeKind::Interface, path.into())
    }

    /// A descriptor for "no type".
    pub fn invalid() -> Self {
        Self::opaque(TypeKind::Invalid, Cow::Borrowed("invalid"))
    }

    fn opaque(kind: TypeKind, path: Cow<'static, str>) -> Self {
        Self {
            kind,
            path,
            type_id: None,
            name: None,
            generator: None,
            pointee: None,
        }
    }

    /// Override the type path registry keys are derived from.
    pub fn with_path(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.path = path.into();
        self
    }

    /// Kind of this descriptor (not of its pointee).
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Type path registry keys are derived from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identity used for deduplication.
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Name schemars gives the type's definition when it is nested.
    pub fn schema_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Schema generator, present for descriptors built with [`Self::of`].
    pub fn generator(&self) -> Option<SchemaFn> {
        self.generator
    }

    /// The pointed-to descriptor for [`TypeKind::Pointer`].
    pub fn pointee(&self) -> Option<&TypeDescriptor> {
        self.pointee.as_deref()
    }

    /// Follow every level of indirection.
    pub fn innermost(&self) -> &TypeDescriptor {
        let mut current = self;
        while let Some(next) = current.pointee() {
            current = next;
        }
        current
    }
}

/// Whether `ty` may own a reusable registry entry.
///
/// At most one indirection is unwrapped; the remaining kind must be neither
/// [`TypeKind::Interface`] nor [`TypeKind::Invalid`]. `None` (no type) is
/// never eligible.
pub fn is_schema_eligible(ty: Option<&TypeDescriptor>) -> bool {
    let Some(ty) = ty else {
        return false;
    };
    let ty = ty.pointee().unwrap_or(ty);
    !matches!(ty.kind(), TypeKind::Interface | TypeKind::Invalid)
}

// ============================================================================
// SchemaRegistry
// ============================================================================

/// Store of reusable named schemas.
pub trait SchemaRegistry {
    /// Add a schema for `ty`, or find the one already registered for it.
    ///
    /// `encoding` and `validation` are discriminators folded into the entry
    /// (e.g. `"json"` and `"binding"`). Returns the registry key.
    fn add_schema(
        &mut self,
        ty: &TypeDescriptor,
        encoding: &str,
        validation: &str,
    ) -> Result<String, SchemaError>;
}
