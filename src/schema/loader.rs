//! Declarative configuration loader
//!
//! Reads an enhancer configuration from JSON:
//!
//! ```json
//! {
//!   "strip_unknown_keys": true,
//!   "params": {
//!     "page": { "validate": { "integer": { "min": 1 } }, "default": 1 },
//!     "sort": { "validate": { "one_of": ["asc", "desc"] }, "default": "asc" },
//!     "q":    { "validate": { "pattern": "^[a-z]*$" } },
//!     "debug": { "validate": "present" }
//!   }
//! }
//! ```
//!
//! Patterns are anchored, so they must match the whole raw value.
//! Predicates and computed defaults cannot be expressed here; add them in
//! code with [`EnhancerConfig::param`].

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::errors::{ConfigurationError, SchemaResult};
use super::types::{EnhancerConfig, ParamDefault, ParamSchema, ParamSpec, Validator};
use super::validator::SchemaValidator;
use crate::codec::CodecOptions;
use crate::observability::{log_event_with_fields, Event};

/// Raw configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDocument {
    /// Drop undeclared keys (default: false)
    #[serde(default)]
    pub strip_unknown_keys: bool,

    /// Codec options (default: repeated-key arrays, nulls and empty strings kept)
    #[serde(default)]
    pub codec: CodecOptions,

    /// Redirect bound for settle passes (default: 8)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Declared parameters. Absent means pass-through mode.
    #[serde(default)]
    pub params: Option<BTreeMap<String, ParamDocument>>,
}

fn default_max_redirects() -> usize {
    super::types::DEFAULT_MAX_REDIRECTS
}

/// One declared parameter as written in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDocument {
    /// Rule; kept untyped so a malformed rule reports against its key
    #[serde(default)]
    pub validate: Option<Value>,

    /// Literal default
    #[serde(default)]
    pub default: Option<Value>,
}

/// Loads and compiles configuration documents.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads a validated configuration from a JSON file.
    pub fn from_path(path: &Path) -> SchemaResult<EnhancerConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::malformed(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Loads a validated configuration from a JSON string.
    pub fn from_str(content: &str) -> SchemaResult<EnhancerConfig> {
        Self::parse(content, "<in-memory>")
    }

    fn parse(content: &str, origin: &str) -> SchemaResult<EnhancerConfig> {
        let document: ConfigDocument = serde_json::from_str(content).map_err(|e| {
            ConfigurationError::malformed(origin, format!("Invalid JSON: {}", e))
        })?;
        let config = Self::load_config(document)?;

        log_event_with_fields(
            Event::SchemaLoaded,
            &[
                ("origin", origin),
                ("params", config.param_count().to_string().as_str()),
            ],
        );
        Ok(config)
    }

    /// Compiles a document into a configuration and validates it.
    pub fn load_config(document: ConfigDocument) -> SchemaResult<EnhancerConfig> {
        let schema = match document.params {
            Some(params) => {
                let mut schema = ParamSchema::new();
                for (key, param) in params {
                    let spec = compile_param(&key, param)?;
                    schema.insert(key, spec);
                }
                Some(schema)
            }
            None => None,
        };

        let config = EnhancerConfig {
            schema,
            strip_unknown_keys: document.strip_unknown_keys,
            codec_options: document.codec,
            max_redirects: document.max_redirects,
        };
        SchemaValidator::new(&config).validate()?;
        Ok(config)
    }
}

fn compile_param(key: &str, param: ParamDocument) -> SchemaResult<ParamSpec> {
    let rule = param
        .validate
        .ok_or_else(|| ConfigurationError::MissingValidate { key: key.to_string() })?;
    let validate = compile_rule(key, &rule)?;
    let default = match param.default {
        Some(value) => ParamDefault::Constant(value),
        None => ParamDefault::None,
    };
    Ok(ParamSpec {
        validate: Some(validate),
        default,
    })
}

fn compile_rule(key: &str, rule: &Value) -> SchemaResult<Validator> {
    let not_callable = || ConfigurationError::ValidateNotCallable { key: key.to_string() };

    match rule {
        Value::String(name) => match name.as_str() {
            "present" => Ok(Validator::Present),
            "any" => Ok(Validator::Any),
            _ => Err(not_callable()),
        },
        Value::Object(obj) if obj.len() == 1 => {
            let (kind, arg) = obj.iter().next().ok_or_else(not_callable)?;
            match kind.as_str() {
                "pattern" => {
                    let pattern = arg.as_str().ok_or_else(not_callable)?;
                    let anchored = format!("^(?:{})$", pattern);
                    Regex::new(&anchored).map(Validator::Pattern).map_err(|e| {
                        ConfigurationError::InvalidPattern {
                            key: key.to_string(),
                            reason: e.to_string(),
                        }
                    })
                }
                "one_of" => {
                    let options = arg
                        .as_array()
                        .ok_or_else(not_callable)?
                        .iter()
                        .map(|v| v.as_str().map(str::to_string).ok_or_else(not_callable))
                        .collect::<SchemaResult<Vec<_>>>()?;
                    Ok(Validator::OneOf(options))
                }
                "integer" => {
                    let bounds = arg.as_object().ok_or_else(not_callable)?;
                    let bound = |name: &str| -> SchemaResult<Option<i64>> {
                        match bounds.get(name) {
                            None | Some(Value::Null) => Ok(None),
                            Some(v) => v.as_i64().map(Some).ok_or_else(not_callable),
                        }
                    };
                    Ok(Validator::IntegerRange {
                        min: bound("min")?,
                        max: bound("max")?,
                    })
                }
                _ => Err(not_callable()),
            }
        }
        _ => Err(not_callable()),
    }
}
