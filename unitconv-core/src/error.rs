//! Conversion errors
//!
//! Failures are values returned to the caller. None of them is fatal and
//! none of them leaves the registry modified.

use crate::ConversionKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNSUPPORTED_CONVERSION: &str = "UNSUPPORTED_CONVERSION";
    pub const NON_FINITE: &str = "NON_FINITE";
}

/// Error type for a single conversion request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Raw input is not a finite number. Carries the text as received.
    #[error("Invalid number: {input:?}")]
    Parse { input: String },

    /// No rule is registered for the requested pair
    #[error("Unsupported conversion: {key}")]
    Unsupported { key: ConversionKey },

    /// The rule produced NaN or an infinity
    #[error("Conversion {key} produced a non-finite result: {value}")]
    NonFinite { key: ConversionKey, value: f64 },
}

impl ConversionError {
    pub fn parse(input: impl Into<String>) -> Self {
        ConversionError::Parse { input: input.into() }
    }

    pub fn unsupported(key: ConversionKey) -> Self {
        ConversionError::Unsupported { key }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::Parse { .. } => codes::PARSE_ERROR,
            ConversionError::Unsupported { .. } => codes::UNSUPPORTED_CONVERSION,
            ConversionError::NonFinite { .. } => codes::NON_FINITE,
        }
    }

    /// The requested pair, when the failure happened after parsing
    pub fn key(&self) -> Option<&ConversionKey> {
        match self {
            ConversionError::Parse { .. } => None,
            ConversionError::Unsupported { key } | ConversionError::NonFinite { key, .. } => Some(key),
        }
    }
}

/// Structured error for clients of the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ConversionError> for ErrorReport {
    fn from(err: &ConversionError) -> Self {
        let report = ErrorReport::new(err.code(), err.to_string());
        match err {
            ConversionError::Parse { .. } => report
                .with_suggestion("Enter a number such as 12 or 3.5"),
            ConversionError::Unsupported { key } if key.is_same_unit() => report
                .with_suggestion("Pick a destination unit different from the source unit"),
            ConversionError::Unsupported { .. } => report
                .with_suggestion("Pick two units from the same category"),
            ConversionError::NonFinite { .. } => report
                .with_suggestion("Use a smaller input value"),
        }
    }
}

impl From<ConversionError> for ErrorReport {
    fn from(err: ConversionError) -> Self {
        ErrorReport::from(&err)
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
