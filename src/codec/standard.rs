//! Default query-string codec
//!
//! Parsing:
//! - a leading `?` or `#` is ignored
//! - pairs are split on `&`; empty pairs and empty keys are skipped
//! - `k` yields `null`, `k=` yields `""`, `k=v` yields `"v"`
//! - repeated keys accumulate into an array in order of appearance
//! - `+` and percent escapes are decoded
//!
//! Serialization writes keys in sorted order, so equal maps always produce
//! byte-identical strings.

use serde_json::Value;
use url::form_urlencoded;

use super::options::{ArrayFormat, CodecOptions};
use super::{QueryCodec, QueryMap};

/// Codec used when no other codec is supplied.
#[derive(Debug, Clone, Default)]
pub struct StandardCodec {
    options: CodecOptions,
}

impl StandardCodec {
    /// Creates a codec with the given options.
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Returns the codec options.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    fn insert(&self, map: &mut QueryMap, key: String, value: Value) {
        match map.get_mut(&key) {
            Some(Value::Array(items)) => push_flat(items, value),
            Some(existing) => {
                let mut items = vec![existing.take()];
                push_flat(&mut items, value);
                *existing = Value::Array(items);
            }
            None => {
                map.insert(key, value);
            }
        }
    }

    fn write_pair(&self, out: &mut Vec<String>, key: &str, value: &Value) {
        match value {
            Value::Null if self.options.skip_null => {}
            Value::Null => out.push(encode(key)),
            Value::String(s) if s.is_empty() && self.options.skip_empty_string => {}
            Value::Array(items) => self.write_array(out, key, items),
            scalar => out.push(format!("{}={}", encode(key), encode(&scalar_text(scalar)))),
        }
    }

    fn write_array(&self, out: &mut Vec<String>, key: &str, items: &[Value]) {
        match self.options.array_format {
            ArrayFormat::None => {
                for item in items {
                    self.write_pair(out, key, &flatten_nested(item));
                }
            }
            ArrayFormat::Bracket => {
                let bracketed = format!("{}[]", key);
                for item in items {
                    self.write_pair(out, &bracketed, &flatten_nested(item));
                }
            }
            ArrayFormat::Comma => {
                let joined: Vec<String> = items
                    .iter()
                    .filter(|item| !(item.is_null() && self.options.skip_null))
                    .map(|item| encode(&scalar_text(item)))
                    .collect();
                if !joined.is_empty() {
                    out.push(format!("{}={}", encode(key), joined.join(",")));
                }
            }
        }
    }
}

impl QueryCodec for StandardCodec {
    fn parse(&self, search: &str) -> QueryMap {
        let trimmed = search
            .strip_prefix('?')
            .or_else(|| search.strip_prefix('#'))
            .unwrap_or(search);

        let mut map = QueryMap::new();
        for pair in trimmed.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = match pair.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (pair, None),
            };

            let mut key = decode(raw_key);
            let mut bracketed = false;
            if self.options.array_format == ArrayFormat::Bracket {
                if let Some(stripped) = key.strip_suffix("[]") {
                    key = stripped.to_string();
                    bracketed = true;
                }
            }
            if key.is_empty() {
                continue;
            }

            let value = match raw_value {
                None => Value::Null,
                Some(v) if self.options.array_format == ArrayFormat::Comma && v.contains(',') => {
                    Value::Array(v.split(',').map(|part| Value::String(decode(part))).collect())
                }
                Some(v) => Value::String(decode(v)),
            };

            if bracketed && !map.contains_key(&key) {
                map.insert(key.clone(), Value::Array(Vec::new()));
            }
            self.insert(&mut map, key, value);
        }
        map
    }

    fn stringify(&self, map: &QueryMap) -> String {
        let mut out = Vec::with_capacity(map.len());
        for (key, value) in map {
            self.write_pair(&mut out, key, value);
        }
        out.join("&")
    }
}

fn push_flat(items: &mut Vec<Value>, value: Value) {
    match value {
        Value::Array(more) => items.extend(more),
        single => items.push(single),
    }
}

/// Nested arrays are not representable; they are written as JSON text.
fn flatten_nested(item: &Value) -> Value {
    match item {
        Value::Array(_) => Value::String(item.to_string()),
        other => other.clone(),
    }
}

/// Text form of a non-array value.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn encode(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes()).collect()
}

fn decode(component: &str) -> String {
    // With an empty name, everything after the first '=' is the value, so
    // any '=' inside the component survives decoding.
    let pair = format!("={}", component);
    form_urlencoded::parse(pair.as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
