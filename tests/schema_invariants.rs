//! Schema Invariant Tests
//!
//! Tests for definition-time validation:
//! - Stripping unknown keys requires at least one declared parameter
//! - Every declared parameter must carry a usable validator
//! - Rejected configurations never produce an enhancer
//! - Declarative documents compile to the same behavior as code-built schemas

use querysync::reconciler::Outcome;
use querysync::schema::{ParamSchema, SchemaLoader, SchemaValidator};
use querysync::{
    with_query_params, ConfigurationError, EnhancerConfig, Location, ParamSpec, Validator,
};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const LISTING_CONFIG: &str = r#"{
    "strip_unknown_keys": true,
    "params": {
        "page": { "validate": { "integer": { "min": 1 } }, "default": 1 },
        "sort": { "validate": { "one_of": ["asc", "desc"] }, "default": "asc" },
        "q":    { "validate": { "pattern": "[a-z]*" } }
    }
}"#;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("query_params.json");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

// =============================================================================
// Strip Gate Tests
// =============================================================================

/// Stripping with no schema always fails.
#[test]
fn test_strip_without_schema_fails() {
    let result = with_query_params(EnhancerConfig::new().strip_unknown_keys(true));
    assert_eq!(result.unwrap_err(), ConfigurationError::StripWithoutKeys);
}

/// Stripping with an empty schema always fails.
#[test]
fn test_strip_with_empty_schema_fails() {
    let mut config = EnhancerConfig::new().strip_unknown_keys(true);
    config.schema = Some(ParamSchema::new());
    assert_eq!(
        with_query_params(config).unwrap_err().code(),
        "QS_STRIP_WITHOUT_KEYS"
    );
}

/// The same document fails the same way every time.
#[test]
fn test_rejection_is_deterministic() {
    for _ in 0..100 {
        let config = EnhancerConfig::new()
            .param("b", ParamSpec::default())
            .param("a", ParamSpec::default());
        let err = SchemaValidator::new(&config).validate().unwrap_err();
        assert_eq!(err, ConfigurationError::MissingValidate { key: "a".into() });
    }
}

// =============================================================================
// Validator Presence Tests
// =============================================================================

/// A declared parameter without a validator is rejected before any instance.
#[test]
fn test_missing_validate_fails() {
    let config = EnhancerConfig::new().param("n", ParamSpec::default().with_default(0));
    let err = with_query_params(config).unwrap_err();
    assert_eq!(err.to_string(), "Missing validate function for key n");
}

/// A declarative validator that is not a rule is rejected with a distinct error.
#[test]
fn test_non_callable_validate_fails() {
    let err = SchemaLoader::from_str(r#"{ "params": { "n": { "validate": 42 } } }"#)
        .unwrap_err();
    assert_eq!(err, ConfigurationError::ValidateNotCallable { key: "n".into() });
    assert_eq!(err.to_string(), "'validate' for n must be a function");
}

/// Pass-through configurations are always accepted.
#[test]
fn test_pass_through_accepted() {
    assert!(with_query_params(EnhancerConfig::new()).is_ok());
}

// =============================================================================
// Loader Tests
// =============================================================================

/// A document on disk loads into a working enhancer.
#[test]
fn test_load_from_file() {
    let (_tmp, path) = write_config(LISTING_CONFIG);
    let config = SchemaLoader::from_path(&path).unwrap();
    assert_eq!(config.param_count(), 3);
    assert!(config.strip_unknown_keys);

    let enhancer = with_query_params(config).unwrap();
    let result = enhancer.canonicalize(
        &Location::new("/list", "?page=0&sort=up&q=Rust&junk=1"),
        &Value::Null,
    );
    // q fails validation and has no default, so it is dropped
    assert_eq!(result.outcome, Outcome::Redirect(Location::new("/list", "?page=1&sort=asc")));
    assert_eq!(result.canonical.get("page"), Some(&json!(1)));
}

/// A canonical location under a loaded config renders directly.
#[test]
fn test_loaded_config_fixed_point() {
    let config = SchemaLoader::from_str(LISTING_CONFIG).unwrap();
    let enhancer = with_query_params(config).unwrap();
    let result = enhancer.canonicalize(
        &Location::new("/list", "?page=3&q=rust&sort=desc"),
        &Value::Null,
    );
    assert_eq!(result.outcome, Outcome::Render);
}

/// Missing files are reported as malformed configuration.
#[test]
fn test_missing_file_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let err = SchemaLoader::from_path(&tmp.path().join("absent.json")).unwrap_err();
    assert_eq!(err.code(), "QS_MALFORMED_CONFIG");
}

/// Loaded configs can be extended with code-built specs.
#[test]
fn test_loaded_config_extended_in_code() {
    let config = SchemaLoader::from_str(LISTING_CONFIG)
        .unwrap()
        .param(
            "view",
            ParamSpec::predicate(|raw, props| raw == props.get("default_view"))
                .with_computed_default(|_, props| props["default_view"].clone()),
        );
    let enhancer = with_query_params(config).unwrap();
    let props = json!({ "default_view": "grid" });

    let result = enhancer.canonicalize(&Location::new("/list", "?page=1&sort=asc"), &props);
    assert_eq!(
        result.outcome,
        Outcome::Redirect(Location::new("/list", "?page=1&sort=asc&view=grid"))
    );
}

/// Strip requested in a document with no params fails at load time.
#[test]
fn test_document_strip_without_params_fails() {
    let err = SchemaLoader::from_str(r#"{ "strip_unknown_keys": true, "params": {} }"#)
        .unwrap_err();
    assert_eq!(err, ConfigurationError::StripWithoutKeys);
}

/// Code-built validators are never "not callable".
#[test]
fn test_code_built_validators_accepted() {
    let config = EnhancerConfig::new()
        .param("a", ParamSpec::new(Validator::Any))
        .param("b", ParamSpec::new(Validator::Present))
        .param("c", ParamSpec::predicate(|_, _| true));
    assert!(with_query_params(config).is_ok());
}
