//! Configuration error types
//!
//! Error codes:
//! - QS_STRIP_WITHOUT_KEYS
//! - QS_MISSING_VALIDATE
//! - QS_VALIDATE_NOT_CALLABLE
//! - QS_INVALID_PATTERN
//! - QS_MALFORMED_CONFIG
//!
//! All configuration errors are fatal: an enhancer is never produced from a
//! configuration that raised one.

use thiserror::Error;

/// Result type for schema and configuration operations
pub type SchemaResult<T> = Result<T, ConfigurationError>;

/// Errors raised while defining an enhancer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `strip_unknown_keys` was requested without any declared parameter
    #[error("at least one query param key must be configured")]
    StripWithoutKeys,

    /// A declared parameter has no validator
    #[error("Missing validate function for key {key}")]
    MissingValidate { key: String },

    /// A declared parameter has a validator that cannot be invoked
    #[error("'validate' for {key} must be a function")]
    ValidateNotCallable { key: String },

    /// A pattern rule did not compile
    #[error("invalid pattern for key {key}: {reason}")]
    InvalidPattern { key: String, reason: String },

    /// Configuration document could not be read or decoded
    #[error("malformed configuration '{origin}': {reason}")]
    Malformed { origin: String, reason: String },
}

impl ConfigurationError {
    /// Create a malformed-configuration error
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigurationError::Malformed {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationError::StripWithoutKeys => "QS_STRIP_WITHOUT_KEYS",
            ConfigurationError::MissingValidate { .. } => "QS_MISSING_VALIDATE",
            ConfigurationError::ValidateNotCallable { .. } => "QS_VALIDATE_NOT_CALLABLE",
            ConfigurationError::InvalidPattern { .. } => "QS_INVALID_PATTERN",
            ConfigurationError::Malformed { .. } => "QS_MALFORMED_CONFIG",
        }
    }

    /// Returns the parameter key the error is about, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigurationError::MissingValidate { key }
            | ConfigurationError::ValidateNotCallable { key }
            | ConfigurationError::InvalidPattern { key, .. } => Some(key),
            _ => None,
        }
    }
}
