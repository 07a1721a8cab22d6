//! Common error types for MPM

use thiserror::Error;

use crate::validation::FieldError;

/// Common result type for MPM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across MPM services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// User-correctable request content, one entry per offending field
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_fields() {
        let err = Error::Validation(vec![
            FieldError::new("lyrics", "lyrics and style cannot both be empty"),
            FieldError::new("instrumental.bpm", "bpm must be between 40 and 240"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: lyrics: lyrics and style cannot both be empty; \
             instrumental.bpm: bpm must be between 40 and 240"
        );
    }
}
