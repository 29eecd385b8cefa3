//! Render-time error types

use thiserror::Error;

use crate::navigation::Location;

/// Result type for settle passes
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors raised while settling a wrapped component.
///
/// Validator and default panics are not represented here; they propagate
/// to the host unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Redirects kept producing new locations
    #[error("redirects did not converge after {limit} attempts (last target {location})")]
    RedirectLoop { limit: usize, location: Location },
}

impl ReconcileError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ReconcileError::RedirectLoop { .. } => "QS_REDIRECT_LOOP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_loop_display() {
        let err = ReconcileError::RedirectLoop {
            limit: 3,
            location: Location::new("/a", "?n=4"),
        };
        assert_eq!(err.code(), "QS_REDIRECT_LOOP");
        let display = err.to_string();
        assert!(display.contains("3 attempts"));
        assert!(display.contains("/a?n=4"));
    }
}
