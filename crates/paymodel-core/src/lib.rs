//! # paymodel-core — Generic Document Conversion
//!
//! The leaf crate of the payment model layer. It turns already-parsed JSON
//! documents (`serde_json::Value`) into language-neutral trees and flat
//! string mappings, and provides the closed-vocabulary mechanism every
//! domain enum is declared with.
//!
//! ## Key Design Principles
//!
//! 1. **One closed sum type.** [`GenericValue`] has six variants and every
//!    consumer matches it exhaustively.
//!
//! 2. **Null literal coercion.** The JSON string `"null"` reads as absence,
//!    exactly like a JSON `null`. See [`coerce`].
//!
//! 3. **Bounded traversal.** The converter walks documents with an explicit
//!    work stack and a configured depth bound, so adversarial nesting fails
//!    with [`ConversionError::DepthExceeded`] instead of exhausting the stack.
//!
//! 4. **Canonical text.** Composite values flatten to RFC 8785 JSON via
//!    `serde_jcs`, so equal trees always produce equal strings.
//!
//! 5. **Absence is not an error.** Missing input and unknown codes are
//!    `None`; only the failures in [`error`] are `Err`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `paymodel-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Pure functions over immutable inputs; everything is `Send + Sync`.

pub mod coerce;
pub mod config;
pub mod convert;
pub mod error;
pub mod fields;
pub mod generic;
pub mod vocabulary;

// Re-export primary types for ergonomic imports.
pub use coerce::{coerce_scalar, null_if_null_or_empty, NULL_LITERAL};
pub use config::{ConverterConfig, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
pub use convert::{to_flat_string_mapping, to_generic, Converter, FlatStringMapping};
pub use error::{ConfigError, ConversionError, PaymodelError, VocabularyError};
pub use fields::JsonObject;
pub use generic::{string_coerce, GenericValue};
pub use vocabulary::{parse_code, parse_opt_code, ClosedVocabulary};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
