//! Error types for the sentiment compiler.
//!
//! All fallible operations return [`Result`], whose error is the
//! [`SentimentError`] enum. Tokenization and syntax checking never fail; errors
//! only come from lexicon validation, the semantic classifier, configuration
//! and I/O in the surrounding application.
//!
//! # Examples
//!
//! ```
//! use sentiment_compiler::error::{Result, SentimentError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SentimentError::validation("Word must contain only letters."))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for sentiment compiler operations.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// I/O errors (reading configuration or batch input)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A lexicon entry failed local validation and was never dispatched
    #[error("Validation error: {0}")]
    Validation(String),

    /// The semantic classifier failed, timed out or returned a malformed payload
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// The classifier's label disagrees with its score (raised only under the reject policy)
    #[error("Contract inconsistency: {0}")]
    ContractInconsistency(String),

    /// Analysis pipeline errors (invalid filter patterns and the like)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation cancelled, e.g. an analysis superseded by a newer sentence
    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SentimentError.
pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        SentimentError::Validation(msg.into())
    }

    /// Create a new classifier-unavailable error.
    pub fn classifier_unavailable<S: Into<String>>(msg: S) -> Self {
        SentimentError::ClassifierUnavailable(msg.into())
    }

    /// Create a new contract inconsistency error.
    pub fn contract_inconsistency<S: Into<String>>(msg: S) -> Self {
        SentimentError::ContractInconsistency(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentimentError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentimentError::Config(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        SentimentError::OperationCancelled(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        SentimentError::ClassifierUnavailable(format!("Timeout: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SentimentError::Other(msg.into())
    }

    /// Whether this error belongs to the semantic phase.
    ///
    /// Token and syntax results remain valid when this returns `true`.
    pub fn is_classifier_failure(&self) -> bool {
        matches!(
            self,
            SentimentError::ClassifierUnavailable(_) | SentimentError::ContractInconsistency(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SentimentError::validation("Score must be at most 1.");
        assert_eq!(
            error.to_string(),
            "Validation error: Score must be at most 1."
        );

        let error = SentimentError::classifier_unavailable("connection refused");
        assert_eq!(
            error.to_string(),
            "Classifier unavailable: connection refused"
        );

        let error = SentimentError::timeout("no response after 50ms");
        assert_eq!(
            error.to_string(),
            "Classifier unavailable: Timeout: no response after 50ms"
        );
    }

    #[test]
    fn test_classifier_failure_classification() {
        assert!(SentimentError::classifier_unavailable("down").is_classifier_failure());
        assert!(SentimentError::contract_inconsistency("label").is_classifier_failure());
        assert!(!SentimentError::validation("bad word").is_classifier_failure());
        assert!(!SentimentError::cancelled("superseded").is_classifier_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SentimentError::from(io_error);

        match error {
            SentimentError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
