//! Field accessors for raw JSON objects.
//!
//! Variant parsers read their fields through these helpers so that every
//! model applies the same absence rules: a missing key, a JSON `null`, a
//! value of the wrong JSON type, and the null literal all read as `None`.

use serde_json::{Map, Value};

use crate::coerce::null_if_null_or_empty;
use crate::convert::{Converter, FlatStringMapping};
use crate::generic::GenericValue;
use crate::vocabulary::{parse_opt_code, ClosedVocabulary};

/// A raw JSON object.
pub type JsonObject = Map<String, Value>;

/// String field; empty strings and the null literal read as absent.
pub fn opt_string(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(null_if_null_or_empty)
        .map(str::to_string)
}

/// Integer field.
pub fn opt_i64(obj: &JsonObject, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

/// Boolean field.
pub fn opt_bool(obj: &JsonObject, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

/// Nested object field.
pub fn opt_object<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a JsonObject> {
    obj.get(key).and_then(Value::as_object)
}

/// Closed-vocabulary field; unknown codes read as absent.
pub fn opt_code<T: ClosedVocabulary>(obj: &JsonObject, key: &str) -> Option<T> {
    parse_opt_code(opt_string(obj, key).as_deref())
}

/// Nested object field as a flat string mapping.
///
/// A nested structure that cannot be converted (too deep) reads as absent;
/// a malformed optional sub-document never fails the enclosing model.
pub fn opt_flat_mapping(
    converter: &Converter,
    obj: &JsonObject,
    key: &str,
) -> Option<FlatStringMapping> {
    let value = obj.get(key).filter(|v| v.is_object())?;
    match converter.to_flat_string_mapping(value) {
        Ok(flat) => flat,
        Err(err) => {
            tracing::trace!(key, error = %err, "optional field could not be flattened");
            None
        }
    }
}

/// Nested object field as a generic mapping; same absence rules as
/// [`opt_flat_mapping`].
pub fn opt_generic_mapping(
    converter: &Converter,
    obj: &JsonObject,
    key: &str,
) -> Option<GenericValue> {
    let value = obj.get(key).filter(|v| v.is_object())?;
    match converter.to_generic(value) {
        Ok(generic) => generic,
        Err(err) => {
            tracing::trace!(key, error = %err, "optional field could not be converted");
            None
        }
    }
}
