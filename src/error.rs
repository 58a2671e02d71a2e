//! Error types for the tweet-sentiment library.
//!
//! All failures are represented by the [`SentimentError`] enum. Nothing in the
//! pipeline recovers locally: an error stops the run and is reported by the
//! binary.
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::error::{Result, SentimentError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SentimentError::data("missing column `text`"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tweet-sentiment operations.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary artifact encoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Malformed input data (missing column, unknown label, etc.)
    #[error("Data error: {0}")]
    Data(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model fitting, prediction or evaluation errors
    #[error("Model error: {0}")]
    Model(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SentimentError.
pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        SentimentError::Data(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentimentError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SentimentError::Model(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SentimentError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SentimentError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SentimentError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SentimentError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

impl From<bincode::Error> for SentimentError {
    fn from(err: bincode::Error) -> Self {
        SentimentError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SentimentError::data("Test data error");
        assert_eq!(error.to_string(), "Data error: Test data error");

        let error = SentimentError::model("Test model error");
        assert_eq!(error.to_string(), "Model error: Test model error");

        let error = SentimentError::invalid_config("test_size must be in (0, 1)");
        assert_eq!(
            error.to_string(),
            "Error: Invalid configuration: test_size must be in (0, 1)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SentimentError::from(io_error);

        match error {
            SentimentError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
