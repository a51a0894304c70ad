//! Dataset splitting utilities.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{SplitConfig, SplitFractions};
use crate::dataset::LabeledDataset;
use crate::error::Result;
use crate::stratify::stratified_partition;

/// Train, validation and test subsets of a labeled dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeWaySplit<F, L> {
    /// Training subset.
    pub train: LabeledDataset<F, L>,

    /// Validation subset.
    pub val: LabeledDataset<F, L>,

    /// Test subset.
    pub test: LabeledDataset<F, L>,
}

impl<F, L> ThreeWaySplit<F, L> {
    /// Total number of records across the three subsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    /// Returns `true` if all three subsets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns subset sizes as `(train, val, test)`.
    #[must_use]
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.train.len(), self.val.len(), self.test.len())
    }

    /// Consumes the split, returning `(train, val, test)`.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        LabeledDataset<F, L>,
        LabeledDataset<F, L>,
        LabeledDataset<F, L>,
    ) {
        (self.train, self.val, self.test)
    }
}

/// Splits a dataset into train and held-out subsets, stratified by label.
///
/// The held-out subset receives `ceil(test_fraction * N)` records.
///
/// # Arguments
///
/// - `dataset`: The records to split
/// - `test_fraction`: Share of records held out, in `(0, 1)`
/// - `shuffle`: Whether to draw members at random
/// - `seed`: Optional random seed for reproducibility
///
/// # Returns
///
/// Tuple of `(train, test)` datasets.
///
/// # Errors
///
/// Returns [`DatasetError::Partition`](crate::DatasetError::Partition) if the
/// labels cannot be stratified with the requested fraction.
///
/// # Example
///
/// ```
/// use ml_splits::{LabeledDataset, train_test_split_stratified};
///
/// let dataset: LabeledDataset<u32, bool> =
///     (0..20).map(|i| (i, i % 4 == 0)).collect();
///
/// let (train, test) = train_test_split_stratified(&dataset, 0.25, true, Some(42))?;
/// assert_eq!(train.len(), 15);
/// assert_eq!(test.len(), 5);
/// # Ok::<(), ml_splits::DatasetError>(())
/// ```
pub fn train_test_split_stratified<F: Clone, L: Ord + Clone + Debug>(
    dataset: &LabeledDataset<F, L>,
    test_fraction: f64,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<(LabeledDataset<F, L>, LabeledDataset<F, L>)> {
    let partition = stratified_partition(dataset.labels(), test_fraction, shuffle, seed)?;
    Ok((dataset.select(&partition.train), dataset.select(&partition.test)))
}

/// Splits a dataset into train, validation and test subsets, each stratified
/// by label.
///
/// The dataset is first partitioned into train and a remainder holding
/// `1 - fractions.train` of the records; the remainder is then partitioned
/// into validation and test in the ratio `val : test`. Both steps use the
/// same `seed`.
///
/// When `shuffle` is `false` the split is fully deterministic and each
/// subset keeps the original record order; `seed` is ignored.
///
/// # Arguments
///
/// - `dataset`: The records to split
/// - `fractions`: Train/val/test fractions, summing to exactly `1.0`
/// - `shuffle`: Whether to draw members at random
/// - `seed`: Optional random seed for reproducibility
///
/// # Returns
///
/// A [`ThreeWaySplit`] whose subsets partition the input records.
///
/// # Errors
///
/// - [`DatasetError::Configuration`](crate::DatasetError::Configuration) if
///   the fractions do not add up to exactly `1.0`. No work is done.
/// - [`DatasetError::Partition`](crate::DatasetError::Partition) if either
///   partition step fails, e.g. a class has a single member or one of the
///   fractions is zero.
///
/// # Panics
///
/// Panics if the subsets do not account for every record, which would
/// indicate a bug in the partition step.
///
/// # Example
///
/// ```
/// use ml_splits::{LabeledDataset, SplitFractions, split_stratified};
///
/// let dataset: LabeledDataset<u32, u8> =
///     (0..100).map(|i| (i, (i % 2) as u8)).collect();
///
/// let split = split_stratified(&dataset, SplitFractions::new(0.5, 0.25, 0.25), true, Some(7))?;
/// assert_eq!(split.sizes(), (50, 25, 25));
/// # Ok::<(), ml_splits::DatasetError>(())
/// ```
pub fn split_stratified<F: Clone, L: Ord + Clone + Debug>(
    dataset: &LabeledDataset<F, L>,
    fractions: SplitFractions,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<ThreeWaySplit<F, L>> {
    fractions.validate()?;

    let labels = dataset.labels();
    let first = stratified_partition(labels, 1.0 - fractions.train, shuffle, seed)?;

    let rest_labels: Vec<&L> = first.test.iter().map(|&i| &labels[i]).collect();
    let second = stratified_partition(&rest_labels, fractions.relative_test(), shuffle, seed)?;

    let val_indices: Vec<usize> = second.train.iter().map(|&i| first.test[i]).collect();
    let test_indices: Vec<usize> = second.test.iter().map(|&i| first.test[i]).collect();

    let split = ThreeWaySplit {
        train: dataset.select(&first.train),
        val: dataset.select(&val_indices),
        test: dataset.select(&test_indices),
    };

    assert_eq!(
        split.len(),
        dataset.len(),
        "stratified split lost or duplicated records"
    );

    info!(
        samples = dataset.len(),
        train = split.train.len(),
        val = split.val.len(),
        test = split.test.len(),
        shuffle,
        "Stratified three-way split"
    );

    Ok(split)
}

/// Runs [`split_stratified`] with the settings from `config`.
///
/// # Errors
///
/// Same as [`split_stratified`].
pub fn split_with_config<F: Clone, L: Ord + Clone + Debug>(
    dataset: &LabeledDataset<F, L>,
    config: &SplitConfig,
) -> Result<ThreeWaySplit<F, L>> {
    split_stratified(dataset, config.fractions, config.shuffle, config.seed)
}
