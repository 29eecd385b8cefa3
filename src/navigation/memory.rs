//! In-memory navigation history
//!
//! An entry stack with a cursor:
//! - `push` appends after the cursor and discards forward entries
//! - `redirect` replaces the entry under the cursor
//! - `back` / `forward` move the cursor without touching entries

use std::cell::RefCell;

use super::location::{normalize_search, Location, LocationPatch};
use super::Navigator;

#[derive(Debug)]
struct HistoryState {
    entries: Vec<Location>,
    index: usize,
}

/// Navigator backed by an in-memory entry stack.
///
/// Single-threaded: state lives in a `RefCell`.
#[derive(Debug)]
pub struct MemoryHistory {
    base_path: String,
    state: RefCell<HistoryState>,
}

impl MemoryHistory {
    /// Creates a history whose only entry is `initial`.
    pub fn new(initial: Location) -> Self {
        Self::with_base_path(initial, "")
    }

    /// Creates a history from an href such as `/items?page=2`.
    pub fn from_href(href: &str) -> Self {
        Self::new(Location::from_href(href))
    }

    /// Creates a history whose hrefs are prefixed with `base_path`.
    ///
    /// A trailing `/` on the base path is dropped.
    pub fn with_base_path(initial: Location, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            state: RefCell::new(HistoryState {
                entries: vec![initial],
                index: 0,
            }),
        }
    }

    /// Number of entries in the stack
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Always false: a history holds at least its initial entry
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.state.borrow().index
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> Vec<Location> {
        self.state.borrow().entries.clone()
    }

    /// Move the cursor back one entry. Returns false at the start.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index == 0 {
            return false;
        }
        state.index -= 1;
        true
    }

    /// Move the cursor forward one entry. Returns false at the end.
    pub fn forward(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index + 1 >= state.entries.len() {
            return false;
        }
        state.index += 1;
        true
    }

    fn strip_base<'h>(&self, href: &'h str) -> &'h str {
        if self.base_path.is_empty() {
            return href;
        }
        match href.strip_prefix(self.base_path.as_str()) {
            Some(rest) if rest.is_empty() => "/",
            Some(rest) if rest.starts_with('/') || rest.starts_with('?') => rest,
            _ => href,
        }
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Location {
        let state = self.state.borrow();
        state.entries[state.index].clone()
    }

    fn create_href(&self, patch: &LocationPatch) -> String {
        let pathname = patch.pathname.as_deref().unwrap_or("/");
        let search = normalize_search(patch.search.as_deref().unwrap_or(""));
        format!("{}{}{}", self.base_path, pathname, search)
    }

    fn push(&self, href: &str) {
        let location = Location::from_href(self.strip_base(href));
        let mut state = self.state.borrow_mut();
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(location);
        state.index = next;
    }

    fn redirect(&self, to: &Location) {
        let mut state = self.state.borrow_mut();
        let index = state.index;
        state.entries[index] = to.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_and_moves_cursor() {
        let history = MemoryHistory::from_href("/a?x=1");
        history.push("/b?y=2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert_eq!(history.location(), Location::new("/b", "?y=2"));
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let history = MemoryHistory::from_href("/a");
        history.push("/b");
        history.push("/c");
        assert!(history.back());
        assert!(history.back());
        history.push("/d");
        let paths: Vec<_> = history.entries().into_iter().map(|l| l.pathname).collect();
        assert_eq!(paths, vec!["/a", "/d"]);
    }

    #[test]
    fn test_redirect_replaces_current_entry() {
        let history = MemoryHistory::from_href("/a?n=abc");
        history.redirect(&Location::new("/a", "?n=0"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.location().search, "?n=0");
    }

    #[test]
    fn test_back_and_forward_bounds() {
        let history = MemoryHistory::from_href("/a");
        assert!(!history.back());
        assert!(!history.forward());
        history.push("/b");
        assert!(history.back());
        assert_eq!(history.location().pathname, "/a");
        assert!(history.forward());
        assert_eq!(history.location().pathname, "/b");
    }

    #[test]
    fn test_create_href_with_base_path() {
        let history = MemoryHistory::with_base_path(Location::new("/list", ""), "/app/");
        let href = history.create_href(&LocationPatch::new("/list", "a=1"));
        assert_eq!(href, "/app/list?a=1");

        history.push(&href);
        assert_eq!(history.location(), Location::new("/list", "?a=1"));
    }

    #[test]
    fn test_create_href_omits_empty_search() {
        let history = MemoryHistory::from_href("/");
        assert_eq!(history.create_href(&LocationPatch::new("/x", "")), "/x");
    }
}
