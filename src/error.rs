//! Error types.

use thiserror::Error;

/// Errors raised while loading an instance, configuring an engine,
/// or validating a tour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("expected {expected} location records, got {actual}")]
    LocationCount { expected: usize, actual: usize },

    #[error("malformed location record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("initial temperature must be finite and positive, got {0}")]
    InvalidTemperature(f64),

    #[error("tour is not a permutation: {0}")]
    InvariantViolation(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
