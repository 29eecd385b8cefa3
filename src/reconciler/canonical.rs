//! Canonicalization of a location's query string
//!
//! Steps, run on every render:
//! 1. parse the search string
//! 2. validate each declared parameter, substituting its default when invalid
//! 3. keep or strip undeclared keys
//! 4. serialize and compare with the current search string
//!
//! Applying the algorithm to a canonical location yields `Outcome::Render`:
//! canonical locations are fixed points.

use serde_json::Value;

use crate::codec::{QueryCodec, QueryMap};
use crate::navigation::Location;
use crate::schema::{EnhancerConfig, ParamSpec};

/// What the reconciler should do with a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The location is canonical; render the wrapped component
    Render,
    /// Navigate to the canonical location before rendering
    Redirect(Location),
}

/// Result of one canonicalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Canonicalization {
    /// Parameters as parsed from the location
    pub raw: QueryMap,
    /// Parameters after validation, defaulting and filtering
    pub canonical: QueryMap,
    /// `canonical` serialized, without a leading `?`
    pub search: String,
    pub outcome: Outcome,
}

impl Canonicalization {
    /// True when the pass asks for a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self.outcome, Outcome::Redirect(_))
    }
}

/// Compute the canonical query for `location`.
///
/// Pure: the result depends only on the arguments, provided every validator
/// and default is itself pure. A parameter with no validator (a configuration
/// that bypassed [`SchemaValidator`](crate::schema::SchemaValidator)) is
/// treated as always invalid.
pub fn canonicalize(
    config: &EnhancerConfig,
    codec: &dyn QueryCodec,
    location: &Location,
    props: &Value,
) -> Canonicalization {
    let raw = codec.parse(&location.search);

    let canonical = match &config.schema {
        None => raw.clone(),
        Some(schema) => {
            let mut canonical = if config.strip_unknown_keys {
                QueryMap::new()
            } else {
                raw.clone()
            };
            for (key, spec) in schema {
                match canonical_value(spec, raw.get(key), props) {
                    Some(value) => {
                        canonical.insert(key.clone(), value);
                    }
                    None => {
                        canonical.remove(key);
                    }
                }
            }
            canonical
        }
    };

    let search = codec.stringify(&canonical);
    let outcome = if location.query() == search {
        Outcome::Render
    } else {
        Outcome::Redirect(Location::new(location.pathname.clone(), &search))
    };

    Canonicalization {
        raw,
        canonical,
        search,
        outcome,
    }
}

/// Canonical value of one declared parameter; `None` means absent.
fn canonical_value(spec: &ParamSpec, raw: Option<&Value>, props: &Value) -> Option<Value> {
    let valid = spec
        .validate
        .as_ref()
        .map_or(false, |validator| validator.check(raw, props));

    if valid {
        raw.cloned()
    } else {
        spec.default.resolve(raw, props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::StandardCodec;
    use crate::schema::{ParamSpec, Validator};
    use regex::Regex;
    use serde_json::json;

    fn digits() -> ParamSpec {
        ParamSpec::new(Validator::Pattern(Regex::new(r"^\d+$").unwrap())).with_default(0)
    }

    fn run(config: &EnhancerConfig, search: &str) -> Canonicalization {
        let codec = StandardCodec::default();
        canonicalize(config, &codec, &Location::new("/list", search), &Value::Null)
    }

    #[test]
    fn test_pass_through_without_schema() {
        let config = EnhancerConfig::new();
        let result = run(&config, "?b=2&a=1");
        assert_eq!(result.canonical, result.raw);
        // Sorting alone forces a redirect to the canonical ordering
        assert_eq!(
            result.outcome,
            Outcome::Redirect(Location::new("/list", "?a=1&b=2"))
        );
        assert_eq!(run(&config, "?a=1&b=2").outcome, Outcome::Render);
    }

    #[test]
    fn test_invalid_value_takes_default() {
        let config = EnhancerConfig::new().param("n", digits());
        let result = run(&config, "?n=abc");
        assert_eq!(result.canonical["n"], json!(0));
        assert_eq!(result.search, "n=0");
        assert_eq!(result.outcome, Outcome::Redirect(Location::new("/list", "?n=0")));
    }

    #[test]
    fn test_absent_value_takes_default() {
        let config = EnhancerConfig::new().param("n", digits());
        let result = run(&config, "");
        assert_eq!(result.search, "n=0");
        assert!(result.is_redirect());
    }

    #[test]
    fn test_invalid_without_default_is_dropped() {
        let config = EnhancerConfig::new()
            .param("n", ParamSpec::new(Validator::Pattern(Regex::new(r"^\d+$").unwrap())));
        let result = run(&config, "?n=abc&x=1");
        assert!(!result.canonical.contains_key("n"));
        assert_eq!(result.search, "x=1");
    }

    #[test]
    fn test_valid_absent_value_stays_absent() {
        let config = EnhancerConfig::new().param("opt", ParamSpec::new(Validator::Any));
        let result = run(&config, "?x=1");
        assert!(!result.canonical.contains_key("opt"));
        assert_eq!(result.outcome, Outcome::Render);
    }

    #[test]
    fn test_missing_validator_counts_as_invalid() {
        let mut config = EnhancerConfig::new();
        config.schema = Some(
            [("n".to_string(), ParamSpec::default().with_default("d"))]
                .into_iter()
                .collect(),
        );
        assert_eq!(run(&config, "?n=x").search, "n=d");
    }

    #[test]
    fn test_empty_string_and_absent_are_distinct() {
        let config = EnhancerConfig::new()
            .param("e", ParamSpec::new(Validator::Present).with_default("absent"));
        assert_eq!(run(&config, "?e=").search, "e=");
        assert_eq!(run(&config, "").search, "e=absent");
    }

    #[test]
    fn test_redirect_keeps_pathname() {
        let config = EnhancerConfig::new().param("n", digits());
        let codec = StandardCodec::default();
        let location = Location::new("/deep/path", "?n=x");
        let result = canonicalize(&config, &codec, &location, &Value::Null);
        assert_eq!(
            result.outcome,
            Outcome::Redirect(Location::new("/deep/path", "?n=0"))
        );
    }

    #[test]
    fn test_search_without_question_mark_compares_equal() {
        let config = EnhancerConfig::new().param("n", digits());
        let codec = StandardCodec::default();
        let location = Location {
            pathname: "/".into(),
            search: "n=5".into(),
        };
        let result = canonicalize(&config, &codec, &location, &Value::Null);
        assert_eq!(result.outcome, Outcome::Render);
    }
}
