//! Location values exchanged with the navigator

use serde::{Deserialize, Serialize};
use std::fmt;

/// A navigable location: path plus query string.
///
/// `search` keeps its leading `?` when non-empty, like a browser location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    pub search: String,
}

impl Location {
    /// Create a location, normalizing `search` to carry a leading `?`.
    pub fn new(pathname: impl Into<String>, search: impl AsRef<str>) -> Self {
        Self {
            pathname: pathname.into(),
            search: normalize_search(search.as_ref()),
        }
    }

    /// Split an href such as `/items?page=2#top` into a location.
    ///
    /// The fragment is discarded.
    pub fn from_href(href: &str) -> Self {
        let without_fragment = href.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(without_fragment, ""),
        }
    }

    /// The query string without its leading `?`.
    pub fn query(&self) -> &str {
        self.search.strip_prefix('?').unwrap_or(&self.search)
    }

    /// Path and query joined into an href.
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pathname, self.search)
    }
}

/// Partial location handed to [`Navigator::create_href`](super::Navigator::create_href).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationPatch {
    pub pathname: Option<String>,
    pub search: Option<String>,
}

impl LocationPatch {
    /// Patch both path and query
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: Some(pathname.into()),
            search: Some(search.into()),
        }
    }

    /// Fill unset parts from `base`.
    pub fn resolve(&self, base: &Location) -> Location {
        Location::new(
            self.pathname.clone().unwrap_or_else(|| base.pathname.clone()),
            self.search.as_deref().unwrap_or(&base.search),
        )
    }
}

/// Ensure a non-empty search string starts with `?`; `"?"` alone becomes empty.
pub fn normalize_search(search: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_search() {
        assert_eq!(Location::new("/a", "x=1").search, "?x=1");
        assert_eq!(Location::new("/a", "?x=1").search, "?x=1");
        assert_eq!(Location::new("/a", "?").search, "");
        assert_eq!(Location::new("/a", "").search, "");
    }

    #[test]
    fn test_from_href() {
        let loc = Location::from_href("/items?page=2#top");
        assert_eq!(loc.pathname, "/items");
        assert_eq!(loc.search, "?page=2");
        assert_eq!(loc.query(), "page=2");

        let bare = Location::from_href("/items");
        assert_eq!(bare.search, "");
        assert_eq!(bare.href(), "/items");
    }

    #[test]
    fn test_patch_resolves_against_base() {
        let base = Location::new("/list", "?a=1");
        let patch = LocationPatch {
            pathname: None,
            search: Some("b=2".into()),
        };
        assert_eq!(patch.resolve(&base), Location::new("/list", "?b=2"));
        assert_eq!(LocationPatch::default().resolve(&base), base);
    }
}
