//! Error types for the Invoice Interpretation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Extraction, validation, and calculation all fail with a single kind of
//! error carrying an ordered, non-empty list of human-readable problems:
//! every stage accumulates all problems it can detect in one pass before
//! failing, never just the first.

use thiserror::Error;

/// The main error type for the Invoice Interpretation Engine.
///
/// # Example
///
/// ```
/// use invoice_engine::error::EngineError;
///
/// let error = EngineError::validation(vec!["Contract number not found on page 1".to_string()]);
/// assert!(error.to_string().contains("1 error(s)"));
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Strict validation or extraction failed with one or more problems.
    ///
    /// The list is ordered in detection order and never empty.
    #[error("Strict validation failed with {} error(s):\n{}", errors.len(), format_errors(errors))]
    ValidationFailed {
        /// Every problem detected, in detection order.
        errors: Vec<String>,
    },

    /// Engineer directory file was not found at the specified path.
    #[error("Engineer directory not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Engineer directory file could not be parsed.
    #[error("Failed to parse engineer directory '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds a `ValidationFailed` error from a list of accumulated problems.
    pub fn validation(errors: Vec<String>) -> Self {
        EngineError::ValidationFailed { errors }
    }

    /// Returns the accumulated problem list for validation failures.
    pub fn problems(&self) -> &[String] {
        match self {
            EngineError::ValidationFailed { errors } => errors,
            _ => &[],
        }
    }
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
