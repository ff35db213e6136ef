//! # Generic Document Converter
//!
//! Converts a raw JSON document (`serde_json::Value`) into a [`GenericValue`]
//! tree, and derives the all-string [`FlatStringMapping`] from it.
//!
//! ## Depth handling
//!
//! Documents come from a remote service that is only partially trusted, so
//! the traversal never recurses on the call stack. An explicit work stack
//! holds one frame per open array or object, and a document whose composite
//! nesting exceeds [`ConverterConfig::max_depth`] fails with
//! [`ConversionError::DepthExceeded`]. The guaranteed bound is the
//! configured depth: 512 levels by default, up to 4096 when configured.
//! Flattening and dropping the resulting tree are iterative as well, so a
//! document within the bound converts, flattens and frees on a default
//! thread stack.
//!
//! ## Absence
//!
//! A JSON `null` document converts to `None`. Every other document, scalar
//! or composite, converts to `Some`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::coerce::coerce_scalar;
use crate::config::ConverterConfig;
use crate::error::ConversionError;
use crate::generic::{string_coerce, GenericValue};

/// Flat string-keyed mapping with string values.
///
/// Derived one way from a [`GenericValue`] mapping; never converted back.
/// Keys iterate in lexicographic order.
pub type FlatStringMapping = BTreeMap<String, String>;

/// Generic document converter with a fixed depth bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert a document into a generic tree.
    ///
    /// Object members and array elements that are scalars go through
    /// [`coerce_scalar`]; nested composites are converted the same way.
    /// Array order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::DepthExceeded` when the document nests
    /// composites deeper than the configured bound.
    pub fn to_generic(&self, doc: &Value) -> Result<Option<GenericValue>, ConversionError> {
        if doc.is_null() {
            return Ok(None);
        }
        self.convert(doc).map(Some)
    }

    /// Convert a document into a flat mapping of strings.
    ///
    /// Only a top-level object produces a mapping; `null` and any other
    /// document yield `None`. Each top-level entry is flattened with
    /// [`string_coerce`], and entries whose value is absent are omitted
    /// rather than mapped to an empty string.
    pub fn to_flat_string_mapping(
        &self,
        doc: &Value,
    ) -> Result<Option<FlatStringMapping>, ConversionError> {
        if !doc.is_object() {
            return Ok(None);
        }
        let Some(generic) = self.to_generic(doc)? else {
            return Ok(None);
        };
        let Some(entries) = generic.as_mapping() else {
            return Ok(None);
        };
        let mut flat = FlatStringMapping::new();
        for (key, value) in entries {
            if let Some(text) = string_coerce(value)? {
                flat.insert(key.clone(), text);
            }
        }
        Ok(Some(flat))
    }

    fn convert(&self, root: &Value) -> Result<GenericValue, ConversionError> {
        let max_depth = self.config.max_depth();
        let mut stack = match Frame::open(None, root) {
            Some(frame) => vec![frame],
            None => return Ok(coerce_scalar(root).unwrap_or(GenericValue::Null)),
        };

        while let Some(top) = stack.last_mut() {
            match top.next_child() {
                Some((key, child)) => match Frame::open(key, child) {
                    Some(frame) => {
                        if stack.len() >= max_depth {
                            tracing::debug!(max_depth, "document nesting exceeds depth bound");
                            return Err(ConversionError::DepthExceeded { max_depth });
                        }
                        stack.push(frame);
                    }
                    None => {
                        let leaf = coerce_scalar(child).unwrap_or(GenericValue::Null);
                        top.insert(key, leaf);
                    }
                },
                None => {
                    let Some(done) = stack.pop() else { break };
                    let (key, value) = done.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.insert(key, value),
                        None => return Ok(value),
                    }
                }
            }
        }

        // The loop returns when the root frame closes.
        Ok(GenericValue::Null)
    }
}

/// One open composite on the work stack.
struct Frame<'a> {
    /// Key under which the finished value lands in the parent mapping.
    /// `None` for the root and for sequence elements.
    key: Option<&'a String>,
    body: FrameBody<'a>,
}

enum FrameBody<'a> {
    Sequence {
        items: std::slice::Iter<'a, Value>,
        out: Vec<GenericValue>,
    },
    Mapping {
        entries: serde_json::map::Iter<'a>,
        out: BTreeMap<String, GenericValue>,
    },
}

impl<'a> Frame<'a> {
    /// Open a frame for a composite, or `None` for a scalar.
    fn open(key: Option<&'a String>, value: &'a Value) -> Option<Self> {
        let body = match value {
            Value::Array(items) => FrameBody::Sequence {
                items: items.iter(),
                out: Vec::with_capacity(items.len()),
            },
            Value::Object(entries) => FrameBody::Mapping {
                entries: entries.iter(),
                out: BTreeMap::new(),
            },
            _ => return None,
        };
        Some(Self { key, body })
    }

    fn next_child(&mut self) -> Option<(Option<&'a String>, &'a Value)> {
        match &mut self.body {
            FrameBody::Sequence { items, .. } => items.next().map(|v| (None, v)),
            FrameBody::Mapping { entries, .. } => entries.next().map(|(k, v)| (Some(k), v)),
        }
    }

    fn insert(&mut self, key: Option<&String>, value: GenericValue) {
        match (&mut self.body, key) {
            (FrameBody::Sequence { out, .. }, _) => out.push(value),
            (FrameBody::Mapping { out, .. }, Some(key)) => {
                out.insert(key.clone(), value);
            }
            // Mapping children always carry their key.
            (FrameBody::Mapping { .. }, None) => {}
        }
    }

    fn finish(self) -> (Option<&'a String>, GenericValue) {
        let value = match self.body {
            FrameBody::Sequence { out, .. } => GenericValue::Sequence(out),
            FrameBody::Mapping { out, .. } => GenericValue::Mapping(out),
        };
        (self.key, value)
    }
}

/// Convert a document with the default configuration.
pub fn to_generic(doc: &Value) -> Result<Option<GenericValue>, ConversionError> {
    Converter::default().to_generic(doc)
}

/// Flatten a document with the default configuration.
pub fn to_flat_string_mapping(doc: &Value) -> Result<Option<FlatStringMapping>, ConversionError> {
    Converter::default().to_flat_string_mapping(doc)
}
