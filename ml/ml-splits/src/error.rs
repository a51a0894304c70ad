//! Error types for ml-splits crate.

use thiserror::Error;

/// Errors raised by the stratified partition step.
///
/// These are surfaced unchanged through [`DatasetError::Partition`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartitionError {
    /// Requested held-out fraction is outside `(0, 1)`.
    #[error("test fraction {0} must be in (0, 1)")]
    InvalidFraction(f64),

    /// A class has too few members to be stratified.
    #[error(
        "the least populated class {label} has only {count} member(s), \
         which is too few; every class needs at least 2"
    )]
    ClassTooSmall {
        /// Debug rendering of the offending label.
        label: String,
        /// Number of members of that class.
        count: usize,
    },

    /// One side of the partition would hold fewer samples than there are classes.
    #[error("{side} size {size} should be greater or equal to the number of classes {classes}")]
    TooFewSamples {
        /// Which side of the partition is too small (`train` or `test`).
        side: &'static str,
        /// Number of samples that side would receive.
        size: usize,
        /// Number of distinct classes.
        classes: usize,
    },
}

/// Errors that can occur in ml-splits operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Split fractions or other configuration is invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Stratified partition failed.
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// Features and labels are not aligned.
    #[error("features and labels differ in length: {features} vs {labels}")]
    LengthMismatch {
        /// Number of feature records.
        features: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Empty dataset.
    #[error("dataset is empty")]
    EmptyDataset,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DatasetError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(features: usize, labels: usize) -> Self {
        Self::LengthMismatch { features, labels }
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization(reason.into())
    }

    /// Returns `true` for configuration errors.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` for errors coming from the partition step.
    #[must_use]
    pub const fn is_partition(&self) -> bool {
        matches!(self, Self::Partition(_))
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for ml-splits operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
