//! Training run bookkeeping for ML experiments.
//!
//! # History
//!
//! - [`TrainingHistory`] - Per-epoch loss/accuracy records of one run
//! - [`HistoryStats`] - Mean and std of each metric across repeated runs
//!
//! # Evaluation
//!
//! - [`ConfusionMatrix`] - True vs predicted label counts
//!
//! # Timing
//!
//! - [`ElapsedTime`] - `Elapsed time 125s -> 00:02:05` formatting
//!
//! # Example
//!
//! ```
//! use ml_history::{EpochRecord, ElapsedTime, HistoryStats, RunParams, TrainingHistory};
//!
//! let mut history = TrainingHistory::with_params(
//!     RunParams::new(2, 32).with_elapsed(ElapsedTime::from_secs(90)),
//! );
//! history.add_epoch(EpochRecord::new(0, 0.9).with_accuracy(0.6));
//! history.add_epoch(EpochRecord::new(1, 0.4).with_accuracy(0.8));
//!
//! let stats = HistoryStats::across_runs(&[history])?;
//! assert!(stats.to_string().starts_with("accuracy: mean:0.700"));
//! # Ok::<(), ml_history::HistoryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod confusion;
mod elapsed;
mod error;
mod metrics;
mod stats;

pub use confusion::ConfusionMatrix;
pub use elapsed::{ElapsedTime, elapsed_since};
pub use metrics::{EpochRecord, Metric, RunParams, TrainingHistory};
pub use stats::{HistoryStats, MetricStats};

// Re-export error types
pub use error::{HistoryError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ConfusionMatrix, ElapsedTime, EpochRecord, HistoryError, HistoryStats, Metric,
        MetricStats, RunParams, TrainingHistory, elapsed_since,
    };
}
