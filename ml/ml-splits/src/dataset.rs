//! Labeled dataset type.

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// A labeled dataset: feature records paired positionally with class labels.
///
/// Features can be any cloneable record; a flattened image tensor
/// (`Vec<f32>`) is the usual case. Labels are discrete class identifiers.
///
/// # Example
///
/// ```
/// use ml_splits::LabeledDataset;
///
/// let dataset = LabeledDataset::new(
///     vec![vec![0.0_f32; 4], vec![1.0; 4], vec![0.5; 4]],
///     vec![0_u8, 1, 0],
/// )?;
///
/// assert_eq!(dataset.len(), 3);
/// assert_eq!(dataset.labels(), &[0, 1, 0]);
/// # Ok::<(), ml_splits::DatasetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDataset<F, L> {
    features: Vec<F>,
    labels: Vec<L>,
}

impl<F, L> LabeledDataset<F, L> {
    /// Creates a dataset from aligned features and labels.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::LengthMismatch`] if the two sequences differ
    /// in length.
    pub fn new(features: Vec<F>, labels: Vec<L>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(DatasetError::length_mismatch(features.len(), labels.len()));
        }
        Ok(Self { features, labels })
    }

    /// Creates a dataset with no records.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            features: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the feature records.
    #[must_use]
    pub fn features(&self) -> &[F] {
        &self.features
    }

    /// Returns the labels.
    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Returns the record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&F, &L)> {
        Some((self.features.get(index)?, self.labels.get(index)?))
    }

    /// Iterates over `(features, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&F, &L)> {
        self.features.iter().zip(self.labels.iter())
    }

    /// Consumes the dataset, returning `(features, labels)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<F>, Vec<L>) {
        (self.features, self.labels)
    }
}

impl<F: Clone, L: Clone> LabeledDataset<F, L> {
    /// Materializes a new dataset from the records at `indices`, in order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}

impl<F, L> Default for LabeledDataset<F, L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F, L> FromIterator<(F, L)> for LabeledDataset<F, L> {
    fn from_iter<I: IntoIterator<Item = (F, L)>>(iter: I) -> Self {
        let (features, labels) = iter.into_iter().unzip();
        Self { features, labels }
    }
}
