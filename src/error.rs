//! Error types for the attendance and salary service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing records and
//! computing salaries.

use thiserror::Error;

/// The main error type for the service.
///
/// All fallible operations return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_payroll::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound { index: 4, len: 2 };
/// assert_eq!(error.to_string(), "Employee not found at index 4 (2 records)");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee record exists at the requested position.
    #[error("Employee not found at index {index} ({len} records)")]
    EmployeeNotFound {
        /// The requested position.
        index: usize,
        /// The number of records at the time of the request.
        len: usize,
    },

    /// An input value could not be coerced to the expected type.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError {
        /// The input field that failed coercion.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// A stored employee record cannot be used for salary computation.
    #[error("Invalid record {index} ('{name}'): {message}")]
    InvalidRecord {
        /// The position of the offending record.
        index: usize,
        /// The name on the offending record.
        name: String,
        /// A description of the problem.
        message: String,
    },

    /// The record file could not be read or written.
    #[error("Storage error for '{path}': {message}")]
    StorageError {
        /// The path of the record file.
        path: String,
        /// A description of the I/O or format failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An export was requested in a format that is not supported.
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat {
        /// The requested format.
        format: String,
    },

    /// An export file could not be produced.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
