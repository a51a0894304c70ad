//! Statistics across repeated training runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HistoryError, Result};
use crate::metrics::{Metric, TrainingHistory};

/// Mean and population standard deviation of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    /// Arithmetic mean.
    pub mean: f64,

    /// Population standard deviation.
    pub std: f64,

    /// Number of values pooled.
    pub count: usize,
}

impl MetricStats {
    /// Computes statistics over `values`. Returns `None` if empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std: variance.sqrt(),
            count: values.len(),
        })
    }
}

/// Per-metric statistics pooled over every epoch of every run.
///
/// Used to judge run-to-run variability when the same model is trained
/// several times.
///
/// # Example
///
/// ```
/// use ml_history::{EpochRecord, HistoryStats, Metric, TrainingHistory};
///
/// let mut a = TrainingHistory::new();
/// a.add_epoch(EpochRecord::new(0, 0.4));
/// let mut b = TrainingHistory::new();
/// b.add_epoch(EpochRecord::new(0, 0.6));
///
/// let stats = HistoryStats::across_runs(&[a, b])?;
/// let loss = stats.get(Metric::Loss).unwrap();
/// assert!((loss.mean - 0.5).abs() < 1e-12);
/// assert!((loss.std - 0.1).abs() < 1e-12);
/// # Ok::<(), ml_history::HistoryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Statistics per metric, in [`Metric::ALL`] order; absent metrics omitted.
    pub metrics: Vec<(Metric, MetricStats)>,

    /// Number of runs summarized.
    pub runs: usize,
}

impl HistoryStats {
    /// Pools each metric over all runs and computes its mean and std.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::EmptyHistory`] if `runs` is empty.
    pub fn across_runs(runs: &[TrainingHistory]) -> Result<Self> {
        if runs.is_empty() {
            return Err(HistoryError::EmptyHistory);
        }

        let metrics: Vec<(Metric, MetricStats)> = Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let values: Vec<f64> = runs.iter().flat_map(|h| h.metric(metric)).collect();
                MetricStats::from_values(&values).map(|stats| (metric, stats))
            })
            .collect();

        debug!(runs = runs.len(), metrics = metrics.len(), "Computed history statistics");

        Ok(Self {
            metrics,
            runs: runs.len(),
        })
    }

    /// Statistics for `metric`, if any run recorded it.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&MetricStats> {
        self.metrics
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, stats)| stats)
    }
}

impl fmt::Display for HistoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (metric, stats) in &self.metrics {
            write!(f, "{metric}: mean:{:.3} std:{:.3} ", stats.mean, stats.std)?;
        }
        Ok(())
    }
}
