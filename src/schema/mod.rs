//! Parameter schema subsystem
//!
//! A schema declares which query parameters an enhancer manages, how each raw
//! value is validated and what replaces it when validation fails.
//!
//! # Design Principles
//!
//! - Schemas are checked once, when the enhancer is defined
//! - A configuration that fails the check never produces an enhancer
//! - Validators and defaults are pure functions of `(raw value, host props)`
//! - Validators and defaults must not panic for any raw value they may see;
//!   a panic propagates to the host unchanged

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{ConfigurationError, SchemaResult};
pub use loader::{ConfigDocument, ParamDocument, SchemaLoader};
pub use types::{
    DefaultFn, EnhancerConfig, ParamDefault, ParamSchema, ParamSpec, ValidateFn, Validator,
    DEFAULT_MAX_REDIRECTS,
};
pub use validator::SchemaValidator;
