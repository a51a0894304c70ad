//! Per-epoch training history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::elapsed::ElapsedTime;
use crate::error::Result;

/// A metric tracked per epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Training accuracy.
    Accuracy,
    /// Training loss.
    Loss,
    /// Validation accuracy.
    ValAccuracy,
    /// Validation loss.
    ValLoss,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Self; 4] = [Self::Accuracy, Self::Loss, Self::ValAccuracy, Self::ValLoss];

    /// Returns the metric name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Loss => "loss",
            Self::ValAccuracy => "val_accuracy",
            Self::ValLoss => "val_loss",
        }
    }

    /// Returns `true` for validation metrics.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValAccuracy | Self::ValLoss)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Metrics recorded for a single epoch.
///
/// # Example
///
/// ```
/// use ml_history::{EpochRecord, Metric};
///
/// let record = EpochRecord::new(0, 0.5).with_accuracy(0.8).with_validation(0.75, 0.6);
/// assert_eq!(record.get(Metric::Loss), Some(0.5));
/// assert_eq!(record.get(Metric::ValAccuracy), Some(0.75));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Epoch number (0-indexed).
    pub epoch: usize,

    /// Training loss.
    pub loss: f64,

    /// Training accuracy, if tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,

    /// Validation accuracy, if computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_accuracy: Option<f64>,

    /// Validation loss, if computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_loss: Option<f64>,
}

impl EpochRecord {
    /// Creates a record with only the training loss.
    #[must_use]
    pub const fn new(epoch: usize, loss: f64) -> Self {
        Self {
            epoch,
            loss,
            accuracy: None,
            val_accuracy: None,
            val_loss: None,
        }
    }

    /// Sets the training accuracy.
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Sets validation accuracy and loss.
    #[must_use]
    pub const fn with_validation(mut self, val_accuracy: f64, val_loss: f64) -> Self {
        self.val_accuracy = Some(val_accuracy);
        self.val_loss = Some(val_loss);
        self
    }

    /// Returns the value of `metric`, if recorded.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Loss => Some(self.loss),
            Metric::ValAccuracy => self.val_accuracy,
            Metric::ValLoss => self.val_loss,
        }
    }
}

/// Hyperparameters and timing of a training run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// Number of epochs requested.
    pub epochs: usize,

    /// Batch size.
    pub batch_size: usize,

    /// Wall-clock training time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<ElapsedTime>,
}

impl RunParams {
    /// Creates run parameters.
    #[must_use]
    pub const fn new(epochs: usize, batch_size: usize) -> Self {
        Self {
            epochs,
            batch_size,
            elapsed: None,
        }
    }

    /// Sets the elapsed training time.
    #[must_use]
    pub const fn with_elapsed(mut self, elapsed: ElapsedTime) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    /// Label identifying the run when comparing hyperparameters,
    /// e.g. `"batch_size:64 - 125s"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.elapsed {
            Some(elapsed) => format!("batch_size:{} - {}", self.batch_size, elapsed.short()),
            None => format!("batch_size:{}", self.batch_size),
        }
    }
}

/// History of one training run.
///
/// # Example
///
/// ```
/// use ml_history::{EpochRecord, Metric, TrainingHistory};
///
/// let mut history = TrainingHistory::new();
/// history.add_epoch(EpochRecord::new(0, 0.9).with_validation(0.6, 0.8));
/// history.add_epoch(EpochRecord::new(1, 0.5).with_validation(0.7, 0.6));
///
/// assert_eq!(history.epochs_completed(), 2);
/// assert_eq!(history.metric(Metric::Loss), vec![0.9, 0.5]);
/// assert_eq!(history.epochs_one_based(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    /// Per-epoch records, in epoch order.
    pub records: Vec<EpochRecord>,

    /// Run parameters.
    #[serde(default)]
    pub params: RunParams,
}

impl TrainingHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty history with run parameters.
    #[must_use]
    pub const fn with_params(params: RunParams) -> Self {
        Self {
            records: Vec::new(),
            params,
        }
    }

    /// Appends the record for an epoch.
    pub fn add_epoch(&mut self, record: EpochRecord) {
        self.records.push(record);
    }

    /// Returns the number of recorded epochs.
    #[must_use]
    pub fn epochs_completed(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no epoch was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if any epoch recorded `metric`.
    #[must_use]
    pub fn has(&self, metric: Metric) -> bool {
        self.records.iter().any(|r| r.get(metric).is_some())
    }

    /// Recorded values of `metric`, skipping epochs where it is absent.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.get(metric)).collect()
    }

    /// Epoch numbers counted from 1, as shown on curve x-axes.
    #[must_use]
    pub fn epochs_one_based(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.epoch + 1).collect()
    }

    /// Returns a copy keeping only the first `max_epochs` records.
    #[must_use]
    pub fn truncated(&self, max_epochs: usize) -> Self {
        Self {
            records: self.records.iter().take(max_epochs).cloned().collect(),
            params: self.params,
        }
    }

    /// Epoch and value of the highest validation accuracy.
    #[must_use]
    pub fn best_val_accuracy(&self) -> Option<(usize, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.val_accuracy.map(|v| (r.epoch, v)))
            .fold(None, |best, (epoch, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((epoch, v)),
            })
    }

    /// Epoch and value of the lowest validation loss.
    #[must_use]
    pub fn best_val_loss(&self) -> Option<(usize, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.val_loss.map(|v| (r.epoch, v)))
            .fold(None, |best, (epoch, v)| match best {
                Some((_, b)) if b <= v => best,
                _ => Some((epoch, v)),
            })
    }

    /// Parses a history from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialization`](crate::HistoryError::Serialization)
    /// for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the history to JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns a human-readable summary.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut s = String::new();
        let _ = writeln!(s, "Training History");
        let _ = writeln!(s, "================");
        let _ = writeln!(s, "Run: {}", self.params.label());
        let _ = writeln!(s, "Epochs completed: {}", self.epochs_completed());
        if let Some(last) = self.records.last() {
            let _ = writeln!(s, "Final loss: {:.4}", last.loss);
            if let Some(acc) = last.accuracy {
                let _ = writeln!(s, "Final accuracy: {acc:.4}");
            }
        }
        if let Some((epoch, acc)) = self.best_val_accuracy() {
            let _ = writeln!(s, "Best val accuracy: {acc:.4} (epoch {})", epoch + 1);
        }
        if let Some((epoch, loss)) = self.best_val_loss() {
            let _ = writeln!(s, "Best val loss: {loss:.4} (epoch {})", epoch + 1);
        }
        if let Some(elapsed) = self.params.elapsed {
            let _ = writeln!(s, "{elapsed}");
        }
        s
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_history() -> TrainingHistory {
        let mut history = TrainingHistory::with_params(
            RunParams::new(3, 64).with_elapsed(ElapsedTime::from_secs(125)),
        );
        history.add_epoch(EpochRecord::new(0, 1.2).with_accuracy(0.55).with_validation(0.60, 1.0));
        history.add_epoch(EpochRecord::new(1, 0.8).with_accuracy(0.70).with_validation(0.72, 0.7));
        history.add_epoch(EpochRecord::new(2, 0.5).with_accuracy(0.82).with_validation(0.71, 0.75));
        history
    }

    #[test]
    fn metric_names() {
        let names: Vec<_> = Metric::ALL.iter().map(Metric::name).collect();
        assert_eq!(names, vec!["accuracy", "loss", "val_accuracy", "val_loss"]);
        assert!(Metric::ValLoss.is_validation());
        assert!(!Metric::Accuracy.is_validation());
        assert_eq!(Metric::ValAccuracy.to_string(), "val_accuracy");
    }

    #[test]
    fn record_builder() {
        let record = EpochRecord::new(4, 0.3).with_accuracy(0.9);
        assert_eq!(record.get(Metric::Accuracy), Some(0.9));
        assert_eq!(record.get(Metric::ValLoss), None);
    }

    #[test]
    fn history_metric_series() {
        let history = sample_history();
        assert_eq!(history.metric(Metric::Accuracy), vec![0.55, 0.70, 0.82]);
        assert_eq!(history.metric(Metric::ValLoss), vec![1.0, 0.7, 0.75]);
        assert!(history.has(Metric::ValAccuracy));
    }

    #[test]
    fn history_without_validation() {
        let mut history = TrainingHistory::new();
        history.add_epoch(EpochRecord::new(0, 0.4));
        assert!(!history.has(Metric::ValLoss));
        assert!(history.metric(Metric::ValLoss).is_empty());
        assert_eq!(history.best_val_accuracy(), None);
    }

    #[test]
    fn history_epochs_one_based() {
        assert_eq!(sample_history().epochs_one_based(), vec![1, 2, 3]);
    }

    #[test]
    fn history_truncated() {
        let history = sample_history();
        let short = history.truncated(2);
        assert_eq!(short.epochs_completed(), 2);
        assert_eq!(short.params, history.params);
        assert_eq!(history.truncated(10).epochs_completed(), 3);
    }

    #[test]
    fn history_best_values() {
        let history = sample_history();
        let (epoch, acc) = history.best_val_accuracy().unwrap();
        assert_eq!(epoch, 1);
        assert_relative_eq!(acc, 0.72);

        let (epoch, loss) = history.best_val_loss().unwrap();
        assert_eq!(epoch, 1);
        assert_relative_eq!(loss, 0.7);
    }

    #[test]
    fn run_params_label() {
        let params = RunParams::new(10, 64).with_elapsed(ElapsedTime::from_secs(125));
        assert_eq!(params.label(), "batch_size:64 - 125s");
        assert_eq!(RunParams::new(10, 32).label(), "batch_size:32");
    }

    #[test]
    fn history_summary() {
        let summary = sample_history().summary();
        assert!(summary.contains("Epochs completed: 3"));
        assert!(summary.contains("Best val accuracy: 0.7200 (epoch 2)"));
        assert!(summary.contains("Elapsed time 125s -> 00:02:05"));
    }

    #[test]
    fn history_json_roundtrip() {
        let history = sample_history();
        let json = history.to_json();
        assert!(json.is_ok());

        let parsed = TrainingHistory::from_json(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), history);
    }

    #[test]
    fn history_from_json_minimal() {
        let parsed = TrainingHistory::from_json(r#"{"records": [{"epoch": 0, "loss": 0.5}]}"#);
        assert!(parsed.is_ok());
        let history = parsed.unwrap_or_default();
        assert_eq!(history.epochs_completed(), 1);
        assert_eq!(history.params, RunParams::default());
    }
}
