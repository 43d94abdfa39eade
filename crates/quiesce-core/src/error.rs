//! Core error types for quiesce-core.
//!
//! The error surface is deliberately narrow: the engines themselves never
//! fail (unknown identifiers, repeated cancels, and stale timers are all
//! absorbed as no-ops). Errors only arise at the data boundary, when loading
//! or validating scenarios and configuration.

use thiserror::Error;

/// Core error type for quiesce-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Scenario contains no steps
    #[error("Scenario has no steps")]
    EmptyScenario,

    /// Scenario steps must be in nondecreasing time order
    #[error("Step {index} at {at_ms}ms is earlier than the previous step at {prev_ms}ms")]
    StepsOutOfOrder {
        index: usize,
        at_ms: u64,
        prev_ms: u64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
