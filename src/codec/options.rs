//! Query codec options
//!
//! Loaded from the `codec` section of a configuration document. Every field
//! has a default so partial documents are accepted.

use serde::{Deserialize, Serialize};

/// How array values are written to and read from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// Repeated keys: `a=1&a=2`
    #[default]
    None,
    /// Bracketed keys: `a[]=1&a[]=2`
    Bracket,
    /// One comma-joined value: `a=1,2`
    Comma,
}

/// Options for [`StandardCodec`](super::StandardCodec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecOptions {
    /// Array encoding (default: repeated keys)
    #[serde(default)]
    pub array_format: ArrayFormat,

    /// Omit keys whose value is null instead of writing a bare key (default: false)
    #[serde(default)]
    pub skip_null: bool,

    /// Omit keys whose value is the empty string (default: false)
    #[serde(default)]
    pub skip_empty_string: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            array_format: ArrayFormat::None,
            skip_null: false,
            skip_empty_string: false,
        }
    }
}

impl CodecOptions {
    /// Create options with the given array format
    pub fn with_array_format(array_format: ArrayFormat) -> Self {
        Self {
            array_format,
            ..Default::default()
        }
    }
}
