//! # Error Types
//!
//! Defined failures of the model layer. Absence (a missing document, an
//! unrecognized discriminator, a variant missing required fields) is never
//! an error here; it is `Option::None` at the call site. The enums below
//! cover the few conditions that are genuine failures.

use thiserror::Error;

/// Top-level error type for the model layer.
#[derive(Error, Debug)]
pub enum PaymodelError {
    /// Generic document conversion failed.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Converter configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A closed-vocabulary code was not recognized.
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// Error during generic document conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The document nests composites deeper than the converter accepts.
    #[error("document nesting exceeds the supported depth of {max_depth} levels")]
    DepthExceeded {
        /// The configured depth bound that was exceeded.
        max_depth: usize,
    },

    /// Canonical JSON serialization of a composite value failed.
    #[error("canonical serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error in converter configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Environment variable name.
        var: String,
        /// The raw value found.
        value: String,
    },

    /// A depth bound outside the supported range was requested.
    #[error("max depth {requested} is outside the supported range {min}..={max}")]
    DepthOutOfRange {
        /// The requested bound.
        requested: usize,
        /// Smallest accepted bound.
        min: usize,
        /// Largest accepted bound.
        max: usize,
    },
}

/// Error parsing a closed-vocabulary code.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VocabularyError {
    /// The code is not a member of the vocabulary.
    #[error("unknown {vocabulary} code: {code:?}")]
    Unknown {
        /// Name of the vocabulary that rejected the code.
        vocabulary: &'static str,
        /// The rejected code.
        code: String,
    },
}
