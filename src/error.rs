//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ledger file to load does not exist
    #[error("Ledger file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Refusing to overwrite an existing ledger file
    #[error("Ledger file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A record line did not split into the expected five fields
    #[error("Malformed record on line {line}: expected 5 fields, found {fields}")]
    MalformedRecord { line: u64, fields: usize },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Check if this is a missing source file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
