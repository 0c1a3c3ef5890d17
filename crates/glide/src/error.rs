//! Error types for configuration loading and validation.
//!
//! The simulation itself has no failure modes: bad pointer timing is dropped
//! and a missing scroll container settles the engine. Errors only arise when
//! a [`ScrollConfig`](crate::ScrollConfig) is parsed or validated.

use thiserror::Error;

/// Error type for configuration loading and validation.
///
/// # Note on Clone and PartialEq
///
/// Parse and IO failures store the message as a `String` rather than the
/// underlying error so the type stays `Clone` and comparable in tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field is outside its documented range.
    ///
    /// # Recovery
    ///
    /// Fix the offending field, or construct the engine with
    /// [`ScrollEngine::new`](crate::ScrollEngine::new), which accepts the
    /// value and only logs a warning.
    #[error("invalid value for `{field}`: {value} (expected {expected})")]
    InvalidValue {
        /// Name of the configuration field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The configuration document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("io error: {0}")]
    Io(String),

    /// The file extension does not name a supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Returns the name of the offending field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidValue { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
