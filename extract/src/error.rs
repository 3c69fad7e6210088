//! Error type for extraction and ping operations.
//!
//! Parsers never fail on unmatched input; they render placeholders instead.
//! [`SiftError`] covers what is left: file and serialization failures,
//! configuration problems, and a failing ping collaborator.

use thiserror::Error;

/// Errors that can occur outside of pure text parsing.
#[derive(Debug, Error)]
pub enum SiftError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The ping collaborator could not run the batch at all.
    #[error("ping collaborator failed: {0}")]
    Collaborator(String),

    /// Caller-supplied settings or rules are unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record failed its constructor checks.
    #[error("validation failed: {0}")]
    Validation(#[from] netsift_core::ValidationError),
}

/// Convenience alias for results with [`SiftError`].
pub type Result<T> = std::result::Result<T, SiftError>;
