//! Observable events
//!
//! Every log line emitted by the crate names one of these events.

use std::fmt;

/// Observable events in querysync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Definition
    /// Enhancer configuration accepted
    EnhancerDefined,
    /// Enhancer configuration rejected
    ConfigRejected,
    /// Declarative configuration loaded
    SchemaLoaded,

    // Render
    /// Location already canonical; wrapped component rendered
    QueryCanonical,
    /// Location not canonical; redirect issued
    QueryRedirect,
    /// Render gate found nothing changed
    RenderSkipped,
    /// Redirects did not converge
    RedirectLoop,

    // Setter
    /// Query change pushed to the navigator
    QueryPush,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::EnhancerDefined => "ENHANCER_DEFINED",
            Event::ConfigRejected => "CONFIG_REJECTED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::QueryCanonical => "QUERY_CANONICAL",
            Event::QueryRedirect => "QUERY_REDIRECT",
            Event::RenderSkipped => "RENDER_SKIPPED",
            Event::RedirectLoop => "REDIRECT_LOOP",
            Event::QueryPush => "QUERY_PUSH",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::ConfigRejected | Event::RedirectLoop)
    }

    /// Returns true for per-render events that are only interesting when tracing
    pub fn is_verbose(&self) -> bool {
        matches!(self, Event::QueryCanonical | Event::RenderSkipped)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
