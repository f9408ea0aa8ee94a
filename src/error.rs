//! Custom error types for homebox
//!
//! This module defines the error hierarchy shared by the ledger and the PDF
//! toolbox using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for homebox operations
#[derive(Error, Debug)]
pub enum HomeboxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors (amounts, dates, page ranges)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A rotation that is not a multiple of 90 degrees
    #[error("Invalid rotation angle: {0} (must be a multiple of 90)")]
    InvalidAngle(i32),

    /// A required selection (category, payer) was left empty
    #[error("Missing selection: {0}")]
    MissingSelection(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Too few input documents for an operation
    #[error("Need at least {needed} input files, got {given}")]
    InsufficientInput { needed: usize, given: usize },

    /// Attempt to write a document with no pages
    #[error("Document has no pages to save")]
    EmptyDocument,

    /// PDF read/write/compress failures, including corrupt sources
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Ledger store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A long-running operation was cancelled before completion
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl HomeboxError {
    /// Create a "not found" error for records
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Record",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (bad amount, date, angle or selection)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidAngle(_) | Self::MissingSelection(_)
        )
    }

    /// Check if this error comes from file or document I/O
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Pdf(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for HomeboxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HomeboxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for HomeboxError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<lopdf::Error> for HomeboxError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}

impl From<crate::models::RecordValidationError> for HomeboxError {
    fn from(err: crate::models::RecordValidationError) -> Self {
        if err.is_missing_selection() {
            Self::MissingSelection(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}

impl From<crate::models::NameValidationError> for HomeboxError {
    fn from(err: crate::models::NameValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<csv::Error> for HomeboxError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for homebox operations
pub type HomeboxResult<T> = Result<T, HomeboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HomeboxError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = HomeboxError::record_not_found("42");
        assert_eq!(err.to_string(), "Record not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_input_error() {
        let err = HomeboxError::InsufficientInput {
            needed: 2,
            given: 1,
        };
        assert_eq!(err.to_string(), "Need at least 2 input files, got 1");
    }

    #[test]
    fn test_validation_family() {
        assert!(HomeboxError::InvalidAngle(45).is_validation());
        assert!(HomeboxError::MissingSelection("payer".into()).is_validation());
        assert!(!HomeboxError::EmptyDocument.is_validation());
    }

    #[test]
    fn test_from_record_validation() {
        use crate::models::{Money, RecordValidationError};

        let err: HomeboxError = RecordValidationError::MissingCategory.into();
        assert!(matches!(err, HomeboxError::MissingSelection(_)));

        let err: HomeboxError = RecordValidationError::NonPositiveAmount(Money::zero()).into();
        assert!(matches!(err, HomeboxError::Validation(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HomeboxError = io_err.into();
        assert!(matches!(err, HomeboxError::Io(_)));
        assert!(err.is_io_failure());
    }
}
