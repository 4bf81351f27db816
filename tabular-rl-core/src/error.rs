//! Error types for the tabular RL workspace

use thiserror::Error;

/// Core error type for RL operations
#[derive(Error, Debug)]
pub enum RLError {
    /// Invalid configuration detected at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// An observation mapped to a bucket index outside the value table
    #[error(
        "Observation out of range: dimension {dim} value {value} maps to bucket {bucket} \
         (valid range 0..{buckets})"
    )]
    ObservationOutOfRange {
        /// Offending observation dimension
        dim: usize,
        /// Raw observation value in that dimension
        value: f64,
        /// Computed (signed) bucket index
        bucket: i64,
        /// Number of buckets per dimension
        buckets: usize,
    },

    /// `feedback` was called with no pending transition recorded by `act`
    #[error("No pending transition: feedback called before act")]
    NoPendingTransition,

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensionality
        expected: usize,
        /// Actual dimensionality
        actual: usize,
    },

    /// Invalid action
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Environment-related errors
    #[error("Environment error: {0}")]
    Environment(String),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for RL operations
pub type Result<T> = std::result::Result<T, RLError>;
