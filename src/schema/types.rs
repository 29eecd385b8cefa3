//! Parameter schema type definitions
//!
//! A schema maps query parameter names to a [`ParamSpec`]: a validator and an
//! optional default used when the raw value fails validation.
//!
//! Supported validators:
//! - predicate: arbitrary `Fn(raw, props) -> bool`
//! - pattern: raw string matched by a regex
//! - one_of: raw string is one of a fixed set
//! - integer: raw string parses as an `i64` inside inclusive bounds
//! - present / any

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::codec::CodecOptions;

/// Signature of a predicate validator: `(raw value, host props) -> valid`.
pub type ValidateFn = Arc<dyn Fn(Option<&Value>, &Value) -> bool + Send + Sync>;

/// Signature of a computed default: `(raw value, host props) -> value`.
pub type DefaultFn = Arc<dyn Fn(Option<&Value>, &Value) -> Value + Send + Sync>;

/// Schema mapping parameter names to their specs.
pub type ParamSchema = BTreeMap<String, ParamSpec>;

/// Upper bound on consecutive redirects before a settle pass gives up.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Decides whether a raw query value is acceptable.
///
/// Every variant must be a pure function of `(raw, props)`. A validator that
/// reads outside state can make canonicalization oscillate.
#[derive(Clone)]
pub enum Validator {
    /// Caller-supplied predicate
    Predicate(ValidateFn),
    /// Raw value is a string matched by the pattern. Anchor the pattern
    /// (`^...$`) to require a full match.
    Pattern(Regex),
    /// Raw value is a string equal to one of the options
    OneOf(Vec<String>),
    /// Raw value is a string parsing as an integer within the inclusive bounds
    IntegerRange {
        /// Lower bound, if any
        min: Option<i64>,
        /// Upper bound, if any
        max: Option<i64>,
    },
    /// Raw value is present (any value, including empty string and bare keys)
    Present,
    /// Always valid
    Any,
}

impl Validator {
    /// Wrap a closure as a predicate validator.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> bool + Send + Sync + 'static,
    {
        Validator::Predicate(Arc::new(f))
    }

    /// Evaluate the validator against a raw value.
    ///
    /// A panicking predicate is not caught here.
    pub fn check(&self, raw: Option<&Value>, props: &Value) -> bool {
        match self {
            Validator::Predicate(f) => f(raw, props),
            Validator::Pattern(re) => raw_str(raw).map_or(false, |s| re.is_match(s)),
            Validator::OneOf(options) => {
                raw_str(raw).map_or(false, |s| options.iter().any(|o| o == s))
            }
            Validator::IntegerRange { min, max } => raw_str(raw)
                .and_then(|s| s.parse::<i64>().ok())
                .map_or(false, |n| {
                    min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
                }),
            Validator::Present => raw.is_some(),
            Validator::Any => true,
        }
    }

    /// Short name used in logs and debug output
    pub fn kind(&self) -> &'static str {
        match self {
            Validator::Predicate(_) => "predicate",
            Validator::Pattern(_) => "pattern",
            Validator::OneOf(_) => "one_of",
            Validator::IntegerRange { .. } => "integer",
            Validator::Present => "present",
            Validator::Any => "any",
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            Validator::OneOf(options) => write!(f, "OneOf({:?})", options),
            Validator::IntegerRange { min, max } => {
                write!(f, "IntegerRange {{ min: {:?}, max: {:?} }}", min, max)
            }
            other => f.write_str(other.kind()),
        }
    }
}

fn raw_str(raw: Option<&Value>) -> Option<&str> {
    raw.and_then(Value::as_str)
}

/// Fallback used when a raw value fails validation.
#[derive(Clone, Default)]
pub enum ParamDefault {
    /// Invalid values are dropped from the canonical query
    #[default]
    None,
    /// Replace with a literal value
    Constant(Value),
    /// Compute a replacement from the raw (invalid) value and the host props
    Computed(DefaultFn),
}

impl ParamDefault {
    /// Wrap a closure as a computed default.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> Value + Send + Sync + 'static,
    {
        ParamDefault::Computed(Arc::new(f))
    }

    /// Resolve the default for a raw value. `None` means the key is dropped.
    pub fn resolve(&self, raw: Option<&Value>, props: &Value) -> Option<Value> {
        match self {
            ParamDefault::None => None,
            ParamDefault::Constant(v) => Some(v.clone()),
            ParamDefault::Computed(f) => Some(f(raw, props)),
        }
    }
}

impl fmt::Debug for ParamDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamDefault::None => f.write_str("None"),
            ParamDefault::Constant(v) => write!(f, "Constant({})", v),
            ParamDefault::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Declared behavior of a single query parameter.
#[derive(Debug, Clone, Default)]
pub struct ParamSpec {
    /// Validator. Must be set; checked when the enhancer is defined.
    pub validate: Option<Validator>,
    /// Fallback for invalid raw values
    pub default: ParamDefault,
}

impl ParamSpec {
    /// Create a spec with the given validator and no default
    pub fn new(validate: Validator) -> Self {
        Self {
            validate: Some(validate),
            default: ParamDefault::None,
        }
    }

    /// Create a spec validated by a closure
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> bool + Send + Sync + 'static,
    {
        Self::new(Validator::predicate(f))
    }

    /// Set a literal default
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = ParamDefault::Constant(value.into());
        self
    }

    /// Set a computed default
    pub fn with_computed_default<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> Value + Send + Sync + 'static,
    {
        self.default = ParamDefault::computed(f);
        self
    }
}

/// Enhancer configuration.
///
/// Built once and shared read-only by every wrapped instance.
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// Declared parameters; `None` puts the enhancer in pass-through mode
    pub schema: Option<ParamSchema>,
    /// Drop every key not declared in the schema
    pub strip_unknown_keys: bool,
    /// Options handed to the query codec
    pub codec_options: CodecOptions,
    /// Consecutive redirects tolerated by a settle pass
    pub max_redirects: usize,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            schema: None,
            strip_unknown_keys: false,
            codec_options: CodecOptions::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl EnhancerConfig {
    /// Create an empty pass-through configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter, creating the schema if needed.
    ///
    /// Replaces any previous declaration for `name`.
    pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.schema
            .get_or_insert_with(ParamSchema::new)
            .insert(name.into(), spec);
        self
    }

    /// Set whether undeclared keys are stripped
    pub fn strip_unknown_keys(mut self, strip: bool) -> Self {
        self.strip_unknown_keys = strip;
        self
    }

    /// Set codec options
    pub fn codec_options(mut self, options: CodecOptions) -> Self {
        self.codec_options = options;
        self
    }

    /// Set the redirect bound for settle passes
    pub fn max_redirects(mut self, limit: usize) -> Self {
        self.max_redirects = limit;
        self
    }

    /// Number of declared parameters
    pub fn param_count(&self) -> usize {
        self.schema.as_ref().map_or(0, |s| s.len())
    }
}
