//! Definition-time validation of enhancer configurations
//!
//! Runs exactly once per enhancer definition, before any instance exists:
//! - `strip_unknown_keys` requires at least one declared parameter
//! - every declared parameter carries a validator
//!
//! A [`Validator`](super::Validator) value is always invocable, so the
//! "present but not callable" case only arises in declarative documents and
//! is reported by [`SchemaLoader`](super::SchemaLoader) while compiling rules.
//!
//! Keys are checked in sorted order so the first reported error is stable.

use super::errors::{ConfigurationError, SchemaResult};
use super::types::EnhancerConfig;

/// Checks that a configuration is well-formed enough that canonicalization
/// cannot hit a missing validator at render time.
pub struct SchemaValidator<'a> {
    config: &'a EnhancerConfig,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator for the given configuration.
    pub fn new(config: &'a EnhancerConfig) -> Self {
        Self { config }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `QS_STRIP_WITHOUT_KEYS` if stripping is requested with an empty or
    ///   absent schema
    /// - `QS_MISSING_VALIDATE` if a declared parameter has no validator
    pub fn validate(&self) -> SchemaResult<()> {
        if self.config.strip_unknown_keys && self.config.param_count() == 0 {
            return Err(ConfigurationError::StripWithoutKeys);
        }

        if let Some(schema) = &self.config.schema {
            for (key, spec) in schema {
                if spec.validate.is_none() {
                    return Err(ConfigurationError::MissingValidate { key: key.clone() });
                }
            }
        }

        Ok(())
    }
}
