//! # Generic Values — Language-Neutral Document Trees
//!
//! `GenericValue` is the closed sum type produced by the generic document
//! converter. Consumers match on it exhaustively; there is no type probing.
//!
//! ## Invariants
//!
//! - Trees are acyclic. Children are owned, so a back-reference cannot be
//!   expressed.
//! - `Sequence` preserves source order.
//! - `Mapping` is keyed by string and iterates in lexicographic key order,
//!   so every traversal of equal trees is identical.
//!
//! ## String coercion
//!
//! [`string_coerce`] flattens a value to text for string-only consumers:
//! `Null` is absence, scalars use their canonical textual form, and
//! composites become RFC 8785 (JCS) JSON text: keys sorted by UTF-16 code
//! units and compact separators. Leaves are rendered by `serde_jcs`; the
//! surrounding structure is written from an explicit work list.
//!
//! ## Depth
//!
//! Canonical text and `Drop` walk the tree without recursing, so any tree
//! the converter accepts can be flattened and freed on a default thread
//! stack. The derived `Clone`, `PartialEq`, `Debug` and `Serialize` impls
//! still recurse once per level.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Number;

use crate::coerce::null_if_null_or_empty;
use crate::error::ConversionError;

/// A JSON-derived value not yet committed to any domain type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenericValue {
    /// Absence: a JSON null or the null literal string.
    Null,
    /// A JSON boolean.
    Bool(bool),
    /// A JSON number, integer or float.
    Number(Number),
    /// A JSON string other than the null literal.
    String(String),
    /// An ordered list.
    Sequence(Vec<GenericValue>),
    /// A string-keyed mapping.
    Mapping(BTreeMap<String, GenericValue>),
}

impl GenericValue {
    /// Whether this is the absence variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[GenericValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, GenericValue>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up `key` when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&GenericValue> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// String entry `key` of a mapping; empty strings read as absent.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(GenericValue::as_str)
            .and_then(null_if_null_or_empty)
    }

    /// Canonical compact JSON text (RFC 8785) for this value.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Serialization` if `serde_jcs` rejects a
    /// leaf. Values built by the converter only hold finite numbers, so
    /// this does not occur for them.
    pub fn to_canonical_json(&self) -> Result<String, ConversionError> {
        let mut out = String::new();
        let mut pending = vec![Token::Value(self)];
        while let Some(token) = pending.pop() {
            match token {
                Token::Punct(text) => out.push_str(text),
                Token::Key(key) => {
                    out.push_str(&serde_jcs::to_string(key)?);
                    out.push(':');
                }
                Token::Value(value) => match value {
                    Self::Null => out.push_str("null"),
                    Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
                    Self::Number(n) => out.push_str(&serde_jcs::to_string(n)?),
                    Self::String(s) => out.push_str(&serde_jcs::to_string(s)?),
                    Self::Sequence(items) => {
                        out.push('[');
                        pending.push(Token::Punct("]"));
                        for (i, item) in items.iter().enumerate().rev() {
                            pending.push(Token::Value(item));
                            if i > 0 {
                                pending.push(Token::Punct(","));
                            }
                        }
                    }
                    Self::Mapping(entries) => {
                        out.push('{');
                        pending.push(Token::Punct("}"));
                        let mut sorted: Vec<_> = entries.iter().collect();
                        sorted.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
                        for (i, (key, item)) in sorted.into_iter().enumerate().rev() {
                            pending.push(Token::Value(item));
                            pending.push(Token::Key(key));
                            if i > 0 {
                                pending.push(Token::Punct(","));
                            }
                        }
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Pending output of [`GenericValue::to_canonical_json`], popped in order.
enum Token<'a> {
    Value(&'a GenericValue),
    Key(&'a String),
    Punct(&'static str),
}

impl Drop for GenericValue {
    fn drop(&mut self) {
        let mut pending = match self {
            Self::Sequence(items) if !items.is_empty() => std::mem::take(items),
            Self::Mapping(entries) if !entries.is_empty() => {
                std::mem::take(entries).into_values().collect()
            }
            _ => return,
        };
        // Children are emptied before they drop, so each nested drop returns
        // immediately.
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Self::Sequence(items) => pending.append(items),
                Self::Mapping(entries) => pending.extend(std::mem::take(entries).into_values()),
                _ => {}
            }
        }
    }
}

impl From<bool> for GenericValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for GenericValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for GenericValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for GenericValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<GenericValue>> for GenericValue {
    fn from(items: Vec<GenericValue>) -> Self {
        Self::Sequence(items)
    }
}

impl From<BTreeMap<String, GenericValue>> for GenericValue {
    fn from(entries: BTreeMap<String, GenericValue>) -> Self {
        Self::Mapping(entries)
    }
}

/// Flatten a generic value to text.
///
/// `Null` yields `None`, never an empty string. Composites become canonical
/// compact JSON text rather than an error, because string-only consumers
/// (flat form bodies, telemetry payloads) must still receive them.
pub fn string_coerce(value: &GenericValue) -> Result<Option<String>, ConversionError> {
    match value {
        GenericValue::Null => Ok(None),
        GenericValue::Bool(b) => Ok(Some(b.to_string())),
        GenericValue::Number(n) => Ok(Some(n.to_string())),
        GenericValue::String(s) => Ok(Some(s.clone())),
        GenericValue::Sequence(_) | GenericValue::Mapping(_) => {
            value.to_canonical_json().map(Some)
        }
    }
}
