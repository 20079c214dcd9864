//! Error types for the hotline engine
//!
//! Nothing here is fatal to an engine. A refused start can be retried, a
//! timed out motion leaves no timers behind, and a rejected option leaves
//! the previous value in place.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by engine and driver operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HotlineError {
    /// The strip has too few items to loop
    #[error("strip needs at least {required} items, found {found}")]
    TooFewItems { required: usize, found: usize },

    /// The operation needs a started engine
    #[error("engine is not started")]
    NotStarted,

    /// A timed motion ran out of time before completing
    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// A motion was replaced, interrupted by a gesture, or the engine stopped
    #[error("{operation} was cancelled")]
    Cancelled { operation: &'static str },

    /// The node is not inside any item of the strip
    #[error("node does not belong to an item of the strip")]
    NotAnItem,

    /// The option name is not recognised
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// The option exists but may not be changed from outside
    #[error("option `{0}` cannot be reconfigured")]
    ProtectedOption(String),

    /// The value could not be applied to the option
    #[error("invalid value for `{name}`: {value}")]
    InvalidValue { name: String, value: String },
}

/// Result type alias for hotline operations
pub type Result<T> = std::result::Result<T, HotlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HotlineError::TooFewItems { required: 2, found: 1 };
        assert_eq!(err.to_string(), "strip needs at least 2 items, found 1");

        let err = HotlineError::Timeout {
            operation: "magnetize",
            after: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "magnetize timed out after 5000ms");

        let err = HotlineError::ProtectedOption("events".into());
        assert_eq!(err.to_string(), "option `events` cannot be reconfigured");
    }

    #[test]
    fn error_equality() {
        assert_eq!(HotlineError::NotStarted, HotlineError::NotStarted);
        assert_ne!(
            HotlineError::Cancelled { operation: "forward" },
            HotlineError::Cancelled { operation: "backward" },
        );
    }
}
