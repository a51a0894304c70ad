//! Stratified two-way partition of a label sequence.
//!
//! This is the primitive the three-way splitter is built on. It decides,
//! per class, how many members go to each side so that both sides keep the
//! class proportions of the input as closely as integer counts allow.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PartitionError;

/// Index sets produced by [`stratified_partition`].
///
/// Indices refer to positions in the label slice that was partitioned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Indices assigned to the train side.
    pub train: Vec<usize>,

    /// Indices assigned to the held-out side.
    pub test: Vec<usize>,
}

impl Partition {
    /// Total number of indices on both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    /// Returns `true` if both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }
}

/// Computes the held-out and train sizes for `n` samples.
///
/// The held-out side is rounded up, the train side gets the rest.
///
/// # Example
///
/// ```
/// use ml_splits::partition_sizes;
///
/// assert_eq!(partition_sizes(10, 0.25), (7, 3));
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn partition_sizes(n: usize, test_fraction: f64) -> (usize, usize) {
    let n_test = ((test_fraction * n as f64).ceil() as usize).min(n);
    (n - n_test, n_test)
}

/// Splits `labels` into a train side and a held-out side of size
/// `ceil(test_fraction * N)`, preserving per-class proportions.
///
/// With `shuffle = true` class members are drawn at random from a
/// `ChaCha8Rng` seeded with `seed` (OS entropy when `None`), and each side is
/// returned in random order. With `shuffle = false` no randomness is used:
/// each class gives its earliest members to the train side and both sides are
/// returned in ascending index order.
///
/// # Arguments
///
/// - `labels`: One class label per record
/// - `test_fraction`: Share of records held out, in `(0, 1)`
/// - `shuffle`: Whether to draw members at random
/// - `seed`: Optional random seed for reproducibility
///
/// # Returns
///
/// A [`Partition`] of record indices into `train` and `test`.
///
/// # Errors
///
/// - [`PartitionError::InvalidFraction`] if `test_fraction` is not in `(0, 1)`.
/// - [`PartitionError::ClassTooSmall`] if a class has fewer than 2 members.
/// - [`PartitionError::TooFewSamples`] if either side would be empty or
///   smaller than the number of classes.
///
/// # Example
///
/// ```
/// use ml_splits::stratified_partition;
///
/// let labels = [0, 0, 0, 0, 1, 1, 1, 1];
/// let partition = stratified_partition(&labels, 0.5, true, Some(42))?;
///
/// assert_eq!(partition.train.len(), 4);
/// assert_eq!(partition.test.len(), 4);
/// let test_ones = partition.test.iter().filter(|&&i| labels[i] == 1).count();
/// assert_eq!(test_ones, 2);
/// # Ok::<(), ml_splits::PartitionError>(())
/// ```
pub fn stratified_partition<L: Ord + Debug>(
    labels: &[L],
    test_fraction: f64,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<Partition, PartitionError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PartitionError::InvalidFraction(test_fraction));
    }

    let mut groups: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(i);
    }

    if let Some((label, members)) = groups.iter().min_by_key(|(_, members)| members.len()) {
        if members.len() < 2 {
            return Err(PartitionError::ClassTooSmall {
                label: format!("{label:?}"),
                count: members.len(),
            });
        }
    }

    let classes = groups.len();
    let (n_train, n_test) = partition_sizes(labels.len(), test_fraction);
    for (side, size) in [("train", n_train), ("test", n_test)] {
        if size == 0 || size < classes {
            return Err(PartitionError::TooFewSamples {
                side,
                size,
                classes,
            });
        }
    }

    let mut rng = shuffle.then(|| seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64));

    let counts: Vec<usize> = groups.values().map(Vec::len).collect();
    let train_counts = approximate_mode(&counts, n_train, rng.as_mut());

    let mut partition = Partition {
        train: Vec::with_capacity(n_train),
        test: Vec::with_capacity(n_test),
    };

    for ((label, mut members), take) in groups.into_iter().zip(train_counts) {
        if let Some(rng) = rng.as_mut() {
            members.shuffle(rng);
        }
        if take == 0 || take == members.len() {
            warn!(
                class = ?label,
                members = members.len(),
                train = take,
                "Class missing from one side of stratified partition"
            );
        }
        let (train, test) = members.split_at(take);
        partition.train.extend_from_slice(train);
        partition.test.extend_from_slice(test);
    }

    if let Some(rng) = rng.as_mut() {
        partition.train.shuffle(rng);
        partition.test.shuffle(rng);
    } else {
        partition.train.sort_unstable();
        partition.test.sort_unstable();
    }

    debug!(
        samples = labels.len(),
        classes,
        train = partition.train.len(),
        test = partition.test.len(),
        shuffle,
        "Stratified partition"
    );

    Ok(partition)
}

/// Distributes `n_draws` among classes proportionally to `counts`.
///
/// Each class first gets the floor of its exact share. The shortfall goes
/// one unit at a time to the classes with the largest remainders; classes
/// tied on remainder are picked at random when `rng` is given and in class
/// order otherwise. The result never exceeds `counts` and sums to `n_draws`
/// whenever `n_draws <= sum(counts)`.
fn approximate_mode(
    counts: &[usize],
    n_draws: usize,
    mut rng: Option<&mut ChaCha8Rng>,
) -> Vec<usize> {
    let total: u128 = counts.iter().map(|&c| c as u128).sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let mut allocated = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for &count in counts {
        let exact = count as u128 * n_draws as u128;
        // exact / total <= count, so the cast back cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        allocated.push((exact / total) as usize);
        remainders.push(exact % total);
    }

    let mut need = n_draws.saturating_sub(allocated.iter().sum());

    let mut levels: Vec<u128> = remainders.iter().copied().filter(|&r| r > 0).collect();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();

    for level in levels {
        if need == 0 {
            break;
        }
        let tied: Vec<usize> = (0..counts.len())
            .filter(|&i| remainders[i] == level)
            .collect();
        let add_now = tied.len().min(need);
        let chosen: Vec<usize> = match rng.as_deref_mut() {
            Some(rng) => tied.choose_multiple(rng, add_now).copied().collect(),
            None => tied[..add_now].to_vec(),
        };
        for i in chosen {
            allocated[i] += 1;
        }
        need -= add_now;
    }

    allocated
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn balanced(classes: usize, per_class: usize) -> Vec<usize> {
        (0..classes * per_class).map(|i| i % classes).collect()
    }

    #[test]
    fn partition_sizes_rounds_test_up() {
        assert_eq!(partition_sizes(10, 0.25), (7, 3));
        assert_eq!(partition_sizes(100, 0.2), (80, 20));
        assert_eq!(partition_sizes(5, 0.5), (2, 3));
    }

    #[test]
    fn partition_sizes_float_noise() {
        // 1.0 - 0.7 is slightly above 0.3
        assert_eq!(partition_sizes(1000, 1.0 - 0.7), (699, 301));
    }

    #[test]
    fn approximate_mode_exact_shares() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(approximate_mode(&[10, 20, 30], 30, Some(&mut rng)), vec![5, 10, 15]);
        assert_eq!(approximate_mode(&[10, 20, 30], 30, None), vec![5, 10, 15]);
    }

    #[test]
    fn approximate_mode_largest_remainder() {
        // shares 1.5, 3.0, 4.5 -> floors 1, 3, 4, one extra; tie between 0 and 2
        let allocated = approximate_mode(&[3, 6, 9], 9, None);
        assert_eq!(allocated, vec![2, 3, 4]);
        assert_eq!(allocated.iter().sum::<usize>(), 9);
    }

    #[test]
    fn approximate_mode_random_ties_sum() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let allocated = approximate_mode(&[7, 7, 7, 7], 10, Some(&mut rng));
            assert_eq!(allocated.iter().sum::<usize>(), 10);
            assert!(allocated.iter().all(|&a| a == 2 || a == 3));
        }
    }

    #[test]
    fn approximate_mode_draws_every_member() {
        let counts = [2, 3, 50, 1000];
        let total = counts.iter().sum();
        assert_eq!(approximate_mode(&counts, total, None), counts.to_vec());
    }

    #[test]
    fn approximate_mode_round_up_stays_within_counts() {
        // shares 0.5, 1.0, 48.5 -> floors 0, 1, 48; the tied remainder
        // rounds up the single-member class or the large one
        let counts = [1, 2, 97];
        assert_eq!(approximate_mode(&counts, 50, None), vec![1, 1, 48]);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let allocated = approximate_mode(&counts, 50, Some(&mut rng));
            assert_eq!(allocated.iter().sum::<usize>(), 50);
            assert!(allocated.iter().zip(&counts).all(|(a, c)| a <= c));
        }

        let counts = [3, 5, 7, 11];
        for n_draws in 0..26 {
            let allocated = approximate_mode(&counts, n_draws, None);
            assert_eq!(allocated.iter().sum::<usize>(), n_draws);
            assert!(allocated.iter().zip(&counts).all(|(a, c)| a <= c));
        }
    }

    #[test]
    fn partition_is_exact() {
        let labels = balanced(3, 20);
        let partition = stratified_partition(&labels, 0.25, true, Some(1)).unwrap();

        assert_eq!(partition.len(), 60);
        let mut all: Vec<usize> = partition.train.iter().chain(&partition.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..60).collect::<Vec<_>>());
    }

    #[test]
    fn partition_preserves_class_counts() {
        let labels = balanced(4, 25);
        let partition = stratified_partition(&labels, 0.2, true, Some(3)).unwrap();

        for class in 0..4 {
            let train = partition.train.iter().filter(|&&i| labels[i] == class).count();
            let test = partition.test.iter().filter(|&&i| labels[i] == class).count();
            assert_eq!(train, 20);
            assert_eq!(test, 5);
        }
    }

    #[test]
    fn partition_reproducible_with_seed() {
        let labels = balanced(5, 40);
        let a = stratified_partition(&labels, 0.3, true, Some(42)).unwrap();
        let b = stratified_partition(&labels, 0.3, true, Some(42)).unwrap();
        assert_eq!(a, b);

        let c = stratified_partition(&labels, 0.3, true, Some(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn partition_without_shuffle_is_ordered() {
        let labels = vec!['a', 'b', 'a', 'b', 'a', 'b', 'a', 'b'];
        let partition = stratified_partition(&labels, 0.5, false, Some(99)).unwrap();

        // Earliest members of each class stay on the train side.
        assert_eq!(partition.train, vec![0, 1, 2, 3]);
        assert_eq!(partition.test, vec![4, 5, 6, 7]);
    }

    #[test]
    fn partition_without_shuffle_ignores_seed() {
        let labels = balanced(3, 10);
        let a = stratified_partition(&labels, 0.3, false, Some(1)).unwrap();
        let b = stratified_partition(&labels, 0.3, false, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn partition_rejects_bad_fraction() {
        let labels = balanced(2, 10);
        for fraction in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let result = stratified_partition(&labels, fraction, true, Some(0));
            assert!(matches!(result, Err(PartitionError::InvalidFraction(_))));
        }
    }

    #[test]
    fn partition_rejects_singleton_class() {
        let labels = vec![0, 0, 0, 1, 1, 1, 2];
        let result = stratified_partition(&labels, 0.3, true, Some(0));
        assert_eq!(
            result,
            Err(PartitionError::ClassTooSmall {
                label: "2".to_string(),
                count: 1,
            })
        );
    }

    #[test]
    fn partition_rejects_too_few_test_samples() {
        // 3 classes, test side of ceil(0.1 * 12) = 2
        let labels = balanced(3, 4);
        let result = stratified_partition(&labels, 0.1, true, Some(0));
        assert_eq!(
            result,
            Err(PartitionError::TooFewSamples {
                side: "test",
                size: 2,
                classes: 3,
            })
        );
    }

    #[test]
    fn partition_rejects_empty_labels() {
        let labels: Vec<u8> = Vec::new();
        let result = stratified_partition(&labels, 0.5, false, None);
        assert!(matches!(result, Err(PartitionError::TooFewSamples { .. })));
    }

    #[test]
    fn partition_unseeded_shuffle_is_still_exact() {
        let labels = balanced(2, 50);
        let partition = stratified_partition(&labels, 0.5, true, None).unwrap();
        assert_eq!(partition.train.len(), 50);
        assert_eq!(partition.test.len(), 50);
    }
}
