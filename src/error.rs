//! Error types for the Rubrika library.
//!
//! All errors are represented by the [`RubrikaError`] enum. Degenerate text
//! (missing cells, numbers, empty strings) is never an error; it simply ends up
//! uncategorized. What does surface here are configuration problems detected
//! before a classification pass starts, cancellation, and the I/O and parsing
//! failures of the CSV and config loaders.
//!
//! # Examples
//!
//! ```
//! use rubrika::error::{RubrikaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RubrikaError::configuration("text column 'comment' not found"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Rubrika operations.
#[derive(Error, Debug)]
pub enum RubrikaError {
    /// I/O errors (reading tables, dictionaries, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors: missing text column, empty or invalid rule set.
    ///
    /// Raised before any record is processed; nothing is mutated.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dataset shape errors (row width mismatch, duplicate columns)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Operation cancelled
    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with RubrikaError.
pub type Result<T> = std::result::Result<T, RubrikaError>;

impl RubrikaError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        RubrikaError::Configuration(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        RubrikaError::Dataset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RubrikaError::Analysis(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        RubrikaError::OperationCancelled(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RubrikaError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        RubrikaError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error describes a configuration problem.
    ///
    /// Callers use this to tell a misconfigured pass apart from a pass that
    /// succeeded with uncategorized rows.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RubrikaError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = RubrikaError::configuration("no categories configured");
        assert_eq!(
            error.to_string(),
            "Configuration error: no categories configured"
        );
        assert!(error.is_configuration());

        let error = RubrikaError::dataset("row 3 has 2 values, expected 4");
        assert_eq!(
            error.to_string(),
            "Dataset error: row 3 has 2 values, expected 4"
        );
        assert!(!error.is_configuration());

        let error = RubrikaError::cancelled("stopped after 10 rows");
        assert_eq!(error.to_string(), "Operation cancelled: stopped after 10 rows");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let rubrika_error = RubrikaError::from(io_error);

        match rubrika_error {
            RubrikaError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
