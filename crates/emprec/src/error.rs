//! Error types for emprec.
//!
//! This module defines all error types used throughout the emprec crate.
//! Conditions the record manager deliberately tolerates (a malformed data
//! file, a missing record) are not errors; they show up as empty results
//! or `false` return values instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for emprec operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to write the data file.
    #[error("failed to write data file {path}: {source}")]
    StoreWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
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

    // === Record Errors ===
    /// A record failed the presence or range checks applied before saving.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// A salary value could not be parsed.
    #[error("invalid salary '{input}': {message}")]
    InvalidSalary {
        /// The text that failed to parse.
        input: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Export Errors ===
    /// Failed to write an exported report.
    #[error("failed to write export {path}: {source}")]
    ExportWrite {
        /// Path of the export file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for emprec operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error for the named field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a new salary parse error.
    #[must_use]
    pub fn invalid_salary(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSalary {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a user-facing validation problem rather than
    /// an environment failure.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidSalary { .. })
    }
}
