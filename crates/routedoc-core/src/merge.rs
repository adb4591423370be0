//! Folding caller overrides and generated defaults into one operation.
//!
//! A *field* is a top-level operation key, or one entry of a top-level
//! object-valued key (a single status code under `responses`, say). Values
//! below that depth are replaced whole. `null` counts as unset.
//!
//! Precedence:
//! 1. overrides fold left to right, later fragments winning per field;
//! 2. the folded overrides win over the generated record, which only fills
//!    fields the overrides leave unset.

use serde_json::{Map, Value};

use crate::operation::{Operation, PartialOperation};

/// Levels of object nesting merged key by key.
const FIELD_DEPTH: usize = 2;

/// Merge `overrides` (in order) over `generated`.
///
/// With no overrides the result is `generated`, unchanged.
///
/// ```rust
/// use routedoc_core::{merge, Operation, PartialOperation};
/// use serde_json::json;
///
/// let generated: Operation = serde_json::from_value(json!({
///     "operationId": "GET_/users",
///     "responses": { "200": { "description": "OK" } }
/// })).unwrap();
///
/// let merged = merge(
///     vec![PartialOperation::new().summary("List users")],
///     generated,
/// );
/// assert_eq!(merged.operation_id(), Some("GET_/users"));
/// assert_eq!(merged.get("summary"), Some(&json!("List users")));
/// ```
pub fn merge<I>(overrides: I, generated: Operation) -> Operation
where
    I: IntoIterator<Item = PartialOperation>,
{
    let base = fold_overrides(overrides);
    let mut merged = generated.into_map();
    overlay(&mut merged, base, FIELD_DEPTH);
    Operation::from_map(merged)
}

/// Fold fragments left to right into one; later fragments win per field.
pub fn fold_overrides<I>(overrides: I) -> Map<String, Value>
where
    I: IntoIterator<Item = PartialOperation>,
{
    overrides.into_iter().fold(Map::new(), |mut acc, fragment| {
        overlay(&mut acc, fragment.into_map(), FIELD_DEPTH);
        acc
    })
}

/// Write every set field of `upper` into `lower`.
fn overlay(lower: &mut Map<String, Value>, upper: Map<String, Value>, depth: usize) {
    for (key, value) in upper {
        match value {
            Value::Null => {}
            Value::Object(incoming) if depth > 1 => match lower.get_mut(&key) {
                Some(Value::Object(existing)) => overlay(existing, incoming, depth - 1),
                _ => {
                    let mut fresh = Map::new();
                    overlay(&mut fresh, incoming, depth - 1);
                    lower.insert(key, Value::Object(fresh));
                }
            },
            value => {
                lower.insert(key, value);
            }
        }
    }
}
