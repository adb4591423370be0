//! Turns payload descriptors into request/response content.
//!
//! Resolution never fails: ineligible types and registry errors both fall
//! back to an open-object schema.

use crate::components::BINDING_VALIDATION;
use crate::document::{ResponseSpec, SchemaOrReference, json_content};
use crate::schema::{SchemaRegistry, TypeDescriptor, is_schema_eligible};

/// Encoding discriminator for JSON bodies.
pub const JSON_ENCODING: &str = "json";

/// Reference to the registry entry for `ty`, or `None` if the type is
/// ineligible or the registry refused it.
pub fn resolve_schema<R>(registry: &mut R, ty: Option<&TypeDescriptor>) -> Option<SchemaOrReference>
where
    R: SchemaRegistry + ?Sized,
{
    let ty = ty.filter(|ty| is_schema_eligible(Some(ty)))?;
    match registry.add_schema(ty, JSON_ENCODING, BINDING_VALIDATION) {
        Ok(key) => Some(SchemaOrReference::Reference(key)),
        Err(e) => {
            log::debug!("Falling back to open-object schema for {}: {e}", ty.path());
            None
        }
    }
}

/// JSON content for `ty`, degrading to the open-object schema.
pub fn resolve_content<R>(registry: &mut R, ty: Option<&TypeDescriptor>) -> ResponseSpec
where
    R: SchemaRegistry + ?Sized,
{
    json_content(resolve_schema(registry, ty).unwrap_or_else(SchemaOrReference::open_object))
}
