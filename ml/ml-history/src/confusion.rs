//! Confusion matrix for classifier evaluation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HistoryError, Result};

/// Counts of (true label, predicted label) pairs.
///
/// Rows are true labels and columns are predicted labels, both in the order
/// of the `classes` given at construction.
///
/// # Example
///
/// ```
/// use ml_history::ConfusionMatrix;
///
/// let actual = ["cat", "cat", "dog", "dog"];
/// let predicted = ["cat", "dog", "dog", "dog"];
/// let cm = ConfusionMatrix::from_predictions(&actual, &predicted, &["cat", "dog"])?;
///
/// assert_eq!(cm.get(0, 1), 1); // one cat predicted as dog
/// assert!((cm.accuracy() - 0.75).abs() < 1e-12);
/// # Ok::<(), ml_history::HistoryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix<L> {
    classes: Vec<L>,
    counts: Vec<Vec<usize>>,
}

impl<L: PartialEq + Clone + Display> ConfusionMatrix<L> {
    /// Builds the matrix from aligned true and predicted labels.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::LengthMismatch`] if the two slices differ in length.
    /// - [`HistoryError::UnknownLabel`] if a label is not in `classes`.
    pub fn from_predictions(actual: &[L], predicted: &[L], classes: &[L]) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(HistoryError::length_mismatch(actual.len(), predicted.len()));
        }

        let index_of = |label: &L| {
            classes
                .iter()
                .position(|c| c == label)
                .ok_or_else(|| HistoryError::unknown_label(label.to_string()))
        };

        let mut counts = vec![vec![0; classes.len()]; classes.len()];
        for (truth, guess) in actual.iter().zip(predicted) {
            counts[index_of(truth)?][index_of(guess)?] += 1;
        }

        debug!(
            samples = actual.len(),
            classes = classes.len(),
            "Built confusion matrix"
        );

        Ok(Self {
            classes: classes.to_vec(),
            counts,
        })
    }
}

impl<L> ConfusionMatrix<L> {
    /// Class labels, in row/column order.
    #[must_use]
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Count of samples with true class `row` predicted as class `col`.
    ///
    /// Returns 0 for out-of-range indices.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.counts
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Number of correctly classified samples.
    #[must_use]
    pub fn correct(&self) -> usize {
        (0..self.classes.len()).map(|i| self.get(i, i)).sum()
    }

    /// Fraction of samples on the diagonal (0 if empty).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// Recall of class `index`: correct / row total. `None` if the row is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recall(&self, index: usize) -> Option<f64> {
        let row: usize = self.counts.get(index)?.iter().sum();
        (row > 0).then(|| self.get(index, index) as f64 / row as f64)
    }

    /// Precision of class `index`: correct / column total. `None` if the
    /// column is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn precision(&self, index: usize) -> Option<f64> {
        if index >= self.classes.len() {
            return None;
        }
        let col: usize = self.counts.iter().map(|r| r[index]).sum();
        (col > 0).then(|| self.get(index, index) as f64 / col as f64)
    }
}

impl<L: Display> ConfusionMatrix<L> {
    /// Returns the matrix as a text table, true labels down, predicted across.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn to_report(&self) -> String {
        use std::fmt::Write;

        let names: Vec<String> = self.classes.iter().map(ToString::to_string).collect();
        let width = names
            .iter()
            .map(String::len)
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1)
            .max(4);

        let mut report = String::new();
        let _ = writeln!(report, "Confusion Matrix (rows: true, columns: predicted)");
        let _ = write!(report, "{:>width$}", "");
        for name in &names {
            let _ = write!(report, " {name:>width$}");
        }
        let _ = writeln!(report);
        for (name, row) in names.iter().zip(&self.counts) {
            let _ = write!(report, "{name:>width$}");
            for count in row {
                let _ = write!(report, " {count:>width$}");
            }
            let _ = writeln!(report);
        }
        report
    }
}
