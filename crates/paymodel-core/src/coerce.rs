//! # Scalar Coercion Rules
//!
//! Pure functions that normalize a raw JSON scalar before it enters a
//! [`GenericValue`] tree.
//!
//! ## The null literal
//!
//! A JSON *string* whose content is exactly `null` (four lowercase ASCII
//! characters) is treated as absence, the same as a JSON `null` token.
//! Older service responses emitted stringified nulls for cleared fields and
//! clients still depend on them reading as absent. The match is exact and
//! case-sensitive: `"NULL"`, `" null"` and `"Null"` stay strings.

use serde_json::Value;

use crate::generic::GenericValue;

/// String content that coerces to absence.
pub const NULL_LITERAL: &str = "null";

/// Coerce a raw JSON scalar to its normalized generic form.
///
/// | Raw | Result |
/// |-----|--------|
/// | `null` | `Null` |
/// | `"null"` | `Null` |
/// | `true` / `false` | `Bool` |
/// | number | `Number` |
/// | any other string | `String` |
///
/// Arrays and objects are not scalars and yield `None`; the converter
/// descends into them instead.
pub fn coerce_scalar(raw: &Value) -> Option<GenericValue> {
    match raw {
        Value::Null => Some(GenericValue::Null),
        Value::String(s) if s == NULL_LITERAL => Some(GenericValue::Null),
        Value::String(s) => Some(GenericValue::String(s.clone())),
        Value::Bool(b) => Some(GenericValue::Bool(*b)),
        Value::Number(n) => Some(GenericValue::Number(n.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Absence for the null literal and for the empty string, the input otherwise.
pub fn null_if_null_or_empty(s: &str) -> Option<&str> {
    if s.is_empty() || s == NULL_LITERAL {
        None
    } else {
        Some(s)
    }
}
