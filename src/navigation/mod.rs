//! Navigation collaborator
//!
//! The reconciler reads locations and requests navigation only through
//! [`Navigator`]; it never owns or mutates the location itself.

mod location;
mod memory;

pub use location::{normalize_search, Location, LocationPatch};
pub use memory::MemoryHistory;

/// Host navigation interface.
pub trait Navigator {
    /// The current location, read fresh on every call
    fn location(&self) -> Location;

    /// Build an href from a partial location. Must be deterministic.
    fn create_href(&self, patch: &LocationPatch) -> String;

    /// Navigate to `href`, adding a history entry
    fn push(&self, href: &str);

    /// Replace the current location with `to`; the caller re-evaluates
    /// against it before rendering
    fn redirect(&self, to: &Location);
}
