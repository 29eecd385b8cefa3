//! Query-string codec
//!
//! The reconciler never touches query-string syntax itself. It relies on a
//! codec with two properties:
//!
//! 1. `parse(stringify(m)) == m` for maps of strings, nulls and string arrays
//! 2. `stringify` is deterministic: equal maps give identical strings
//!
//! [`StandardCodec`] provides both; other codecs can be plugged in through
//! [`QueryCodec`].

mod options;
mod standard;

pub use options::{ArrayFormat, CodecOptions};
pub use standard::StandardCodec;

use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameters keyed by name, iterated in sorted key order.
pub type QueryMap = BTreeMap<String, Value>;

/// Converts between query strings and [`QueryMap`]s.
pub trait QueryCodec {
    /// Parse a search string, with or without its leading `?`.
    fn parse(&self, search: &str) -> QueryMap;

    /// Serialize a map without a leading `?`.
    fn stringify(&self, map: &QueryMap) -> String;
}
