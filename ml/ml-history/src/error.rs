//! Error types for ml-history crate.

use thiserror::Error;

/// Errors that can occur when summarizing training runs.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No history to summarize.
    #[error("no training history to summarize")]
    EmptyHistory,

    /// Two sequences that must be aligned differ in length.
    #[error("length mismatch: {expected} expected, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A label does not belong to the declared classes.
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl HistoryError {
    /// Creates a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Creates an unknown label error.
    #[must_use]
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel(label.into())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for ml-history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
