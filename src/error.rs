//! Error types for the childcare billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving a billing period,
//! loading configuration, retrieving calendar events and folding them.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the childcare billing engine.
///
/// Every variant except [`EngineError::InvalidEvent`] is fatal for a run.
/// `InvalidEvent` is produced per calendar event and is logged and skipped
/// by the accumulator rather than propagated.
///
/// # Example
///
/// ```
/// use childcare_billing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/contract.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/contract.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A date or month given on the command line could not be parsed.
    #[error("Invalid {field} '{value}': {message}")]
    Parse {
        /// The input field that failed to parse (e.g. "start", "month").
        field: String,
        /// The offending input.
        value: String,
        /// A description of the parse failure.
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
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A classification pattern in the configuration is not a valid regular expression.
    #[error("Invalid pattern for '{field}': {message}")]
    InvalidPattern {
        /// The configuration field holding the pattern.
        field: String,
        /// The regex compilation error.
        message: String,
    },

    /// The event source failed to return events.
    #[error("Unable to retrieve events from calendar '{calendar_id}': {message}")]
    Retrieval {
        /// The calendar that was queried.
        calendar_id: String,
        /// The underlying cause.
        message: String,
    },

    /// A single calendar event had unusable timestamps.
    #[error("Invalid event '{label}': {message}")]
    InvalidEvent {
        /// The label of the offending event.
        label: String,
        /// A description of what made the event invalid.
        message: String,
    },

    /// The invoice could not be rendered for output.
    #[error("Failed to render invoice: {message}")]
    Render {
        /// The underlying cause.
        message: String,
    },

    /// A reporting window ends before it starts.
    #[error("Invalid reporting window: {from} is after {to}")]
    InvalidWindow {
        /// The first day of the window.
        from: NaiveDate,
        /// The last day of the window.
        to: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
