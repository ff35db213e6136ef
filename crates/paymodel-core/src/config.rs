//! Converter configuration.
//!
//! The only tunable is the nesting bound of the generic document
//! converter. Defaults suit service responses; override via the
//! `PAYMODEL_MAX_DEPTH` environment variable or explicit construction.

use crate::error::ConfigError;

/// Nesting levels accepted when no override is given.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Largest nesting bound a caller may configure.
///
/// Conversion, canonical text and drop are all iterative, so the bound
/// is not limited by the thread stack.
pub const MAX_SUPPORTED_DEPTH: usize = 4096;

/// Environment variable consulted by [`ConverterConfig::from_env`].
pub const MAX_DEPTH_ENV: &str = "PAYMODEL_MAX_DEPTH";

/// Limits applied by the generic document converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Maximum composite nesting. The root object or array is level 1.
    max_depth: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConverterConfig {
    /// Build a configuration with an explicit depth bound.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DepthOutOfRange` unless
    /// `1 <= max_depth <= MAX_SUPPORTED_DEPTH`.
    pub fn with_max_depth(max_depth: usize) -> Result<Self, ConfigError> {
        if max_depth == 0 || max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::DepthOutOfRange {
                requested: max_depth,
                min: 1,
                max: MAX_SUPPORTED_DEPTH,
            });
        }
        Ok(Self { max_depth })
    }

    /// Load configuration from the environment.
    ///
    /// Variables:
    /// - `PAYMODEL_MAX_DEPTH` (default: 512)
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(MAX_DEPTH_ENV) {
            Ok(raw) => Self::from_raw_depth(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_raw_depth(raw: &str) -> Result<Self, ConfigError> {
        let depth = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue {
                var: MAX_DEPTH_ENV.to_string(),
                value: raw.to_string(),
            })?;
        Self::with_max_depth(depth)
    }

    /// The configured nesting bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
