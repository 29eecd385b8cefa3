//! Observability for querysync
//!
//! - Structured logging through `tracing`, one event per line
//! - Counters per enhancer
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on reconciliation
//! 3. Nothing is logged unless the host installs a subscriber
//!
//! # Usage
//!
//! ```ignore
//! use querysync::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::QueryRedirect, &[("to", "/items?page=1")]);
//! ```

mod events;
mod metrics;

pub use events::Event;
pub use metrics::{MetricsSnapshot, ReconcilerMetrics};

/// Target used for every querysync log line
pub const LOG_TARGET: &str = "querysync";

/// Log an event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields.
///
/// Failures log at WARN, per-render chatter at TRACE, everything else at DEBUG.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let fields = render_fields(fields);
    if event.is_failure() {
        tracing::warn!(target: LOG_TARGET, event = event.as_str(), %fields);
    } else if event.is_verbose() {
        tracing::trace!(target: LOG_TARGET, event = event.as_str(), %fields);
    } else {
        tracing::debug!(target: LOG_TARGET, event = event.as_str(), %fields);
    }
}

/// Fields as `k=v` pairs in key order.
fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{}={:?}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}
