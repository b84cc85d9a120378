//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while accounting worked time.

use thiserror::Error;

use crate::models::ValidationReport;

/// The main error type for the Timesheet Engine.
///
/// Expected bad input never panics: malformed punches surface as
/// [`EngineError::InvalidPunch`] and statutory hard violations as
/// [`EngineError::DailySpanExceeded`].
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     value: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '25:00': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A policy value was loaded but makes no sense (e.g. a zero legal night hour).
    #[error("Invalid policy value '{field}': {message}")]
    InvalidPolicy {
        /// The offending policy field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A clock time was not in `HH:MM` 24-hour form.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A duration was not in `HH:MM` form.
    #[error("Invalid duration '{value}': expected HH:MM")]
    InvalidDuration {
        /// The rejected input.
        value: String,
    },

    /// A date was not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// The punch input failed validation.
    #[error("Invalid punch input: {}", .report.summary())]
    InvalidPunch {
        /// Field-indexed validation messages.
        report: ValidationReport,
    },

    /// Normal plus overtime minutes exceed the statutory daily span.
    #[error("Workday exceeds the legal limit of {limit_hours}h per day")]
    DailySpanExceeded {
        /// The daily limit in whole hours.
        limit_hours: i64,
        /// The minutes that would have been accounted.
        total_minutes: i64,
    },

    /// The record store could not be read or written.
    #[error("Record store error: {message}")]
    StoreError {
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
