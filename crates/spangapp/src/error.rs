//! Error types for spangapp.
//!
//! This module defines all error types used throughout the spangapp crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for spangapp operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Data Access Errors ===
    /// The database file or one of the required tables is missing.
    ///
    /// This is fatal at startup: no section renders without all four
    /// datasets.
    #[error("data unavailable at {path}: {message}")]
    DataUnavailable {
        /// Path to the database file.
        path: PathBuf,
        /// What exactly is missing.
        message: String,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// A required column held a null or untypable value.
    #[error("malformed row in table '{table}': {message}")]
    MalformedRow {
        /// Name of the table the row came from.
        table: &'static str,
        /// Description of the offending cell.
        message: String,
    },

    // === Selection Errors ===
    /// A selection refers to data that does not exist.
    #[error("empty selection: {what}")]
    EmptySelection {
        /// What was selected and found empty.
        what: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O and Serialization Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for spangapp operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a `DataUnavailable` error for the given database path.
    #[must_use]
    pub fn data_unavailable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a `MalformedRow` error for the given table.
    #[must_use]
    pub fn malformed_row(table: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            table,
            message: message.into(),
        }
    }

    /// Create an `EmptySelection` error.
    #[must_use]
    pub fn empty_selection(what: impl Into<String>) -> Self {
        Self::EmptySelection { what: what.into() }
    }

    /// Check if this error is fatal at startup.
    #[must_use]
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }

    /// Check if this error only affects the current selection.
    #[must_use]
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::EmptySelection { .. })
    }
}
