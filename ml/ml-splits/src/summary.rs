//! Class distribution summaries.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::splits::ThreeWaySplit;

/// Per-class record counts of a label sequence.
///
/// Used to check that a split kept the class balance of its source.
///
/// # Example
///
/// ```
/// use ml_splits::ClassDistribution;
///
/// let dist = ClassDistribution::from_labels(&[0, 1, 1, 2, 2, 2]);
/// assert_eq!(dist.total(), 6);
/// assert_eq!(dist.count(&2), 3);
/// assert!((dist.proportion(&2) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDistribution<L: Ord> {
    counts: BTreeMap<L, usize>,
    total: usize,
}

impl<L: Ord> Default for ClassDistribution<L> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<L: Ord + Clone> ClassDistribution<L> {
    /// Counts the labels.
    #[must_use]
    pub fn from_labels(labels: &[L]) -> Self {
        let mut counts = BTreeMap::new();
        for label in labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        Self {
            counts,
            total: labels.len(),
        }
    }

    /// Merges two distributions together.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut counts = self.counts.clone();
        for (label, &count) in &other.counts {
            *counts.entry(label.clone()).or_insert(0) += count;
        }
        Self {
            counts,
            total: self.total + other.total,
        }
    }
}

impl<L: Ord> ClassDistribution<L> {
    /// Total number of labels counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns true if nothing was counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// Number of records with `label` (0 if absent).
    #[must_use]
    pub fn count(&self, label: &L) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Share of records with `label`, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn proportion(&self, label: &L) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f64 / self.total as f64
    }

    /// Iterates over `(label, count)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, usize)> {
        self.counts.iter().map(|(label, &count)| (label, count))
    }

    /// Largest absolute difference in class proportion between `self` and
    /// `other`, over the union of their classes.
    #[must_use]
    pub fn max_deviation(&self, other: &Self) -> f64 {
        self.counts
            .keys()
            .chain(other.counts.keys())
            .map(|label| (self.proportion(label) - other.proportion(label)).abs())
            .fold(0.0, f64::max)
    }
}

impl<L: Ord + Display> ClassDistribution<L> {
    /// Returns a human-readable summary string.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn to_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        let _ = writeln!(report, "Class Distribution");
        let _ = writeln!(report, "==================");
        let _ = writeln!(report, "Total samples: {}", self.total);
        for (label, count) in self.iter() {
            let _ = writeln!(
                report,
                "  Class {label}: {count} ({:.1}%)",
                self.proportion(label) * 100.0
            );
        }
        report
    }
}

impl<F, L: Ord + Clone> ThreeWaySplit<F, L> {
    /// Class distributions of the `(train, val, test)` subsets.
    #[must_use]
    pub fn distributions(
        &self,
    ) -> (
        ClassDistribution<L>,
        ClassDistribution<L>,
        ClassDistribution<L>,
    ) {
        (
            ClassDistribution::from_labels(self.train.labels()),
            ClassDistribution::from_labels(self.val.labels()),
            ClassDistribution::from_labels(self.test.labels()),
        )
    }
}
