//! Reconciler counters
//!
//! - Counters only
//! - Monotonic increase
//! - Shared by every instance wrapped by one enhancer

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one enhancer.
///
/// Relaxed ordering is enough: counters are independent and only read for
/// reporting.
#[derive(Debug, Default)]
pub struct ReconcilerMetrics {
    /// Passes that rendered the wrapped component
    renders: AtomicU64,
    /// Passes that issued a redirect
    redirects: AtomicU64,
    /// Setter navigations
    pushes: AtomicU64,
    /// Updates skipped by the render gate
    skipped_updates: AtomicU64,
}

impl ReconcilerMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_renders(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_redirects(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pushes(&self) {
        self.pushes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_skipped_updates(&self) {
        self.skipped_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            renders: self.renders.load(Ordering::Relaxed),
            redirects: self.redirects.load(Ordering::Relaxed),
            pushes: self.pushes.load(Ordering::Relaxed),
            skipped_updates: self.skipped_updates.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub renders: u64,
    pub redirects: u64,
    pub pushes: u64,
    pub skipped_updates: u64,
}

impl MetricsSnapshot {
    /// Serialize the snapshot as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "renders": self.renders,
            "redirects": self.redirects,
            "pushes": self.pushes,
            "skipped_updates": self.skipped_updates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        assert_eq!(ReconcilerMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increments() {
        let metrics = ReconcilerMetrics::new();
        metrics.increment_renders();
        metrics.increment_renders();
        metrics.increment_redirects();
        metrics.increment_pushes();
        metrics.increment_skipped_updates();

        let snap = metrics.snapshot();
        assert_eq!(snap.renders, 2);
        assert_eq!(snap.redirects, 1);
        assert_eq!(snap.pushes, 1);
        assert_eq!(snap.skipped_updates, 1);
    }

    #[test]
    fn test_snapshot_json() {
        let metrics = ReconcilerMetrics::new();
        metrics.increment_redirects();
        let json = metrics.snapshot().to_json();
        assert_eq!(json["redirects"], 1);
        assert_eq!(json["renders"], 0);
    }
}
