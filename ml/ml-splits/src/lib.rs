//! Stratified dataset splitting for ML experiments.
//!
//! This crate splits labeled datasets into train/validation/test subsets
//! that keep the class balance of the source:
//!
//! # Splitting
//!
//! - [`LabeledDataset`] - Feature records paired with class labels
//! - [`split_stratified`] - Three-way stratified split
//! - [`train_test_split_stratified`] - Two-way stratified split
//! - [`stratified_partition`] - The index-level partition both are built on
//! - [`SplitFractions`] / [`SplitConfig`] - Split settings
//!
//! # Inspection
//!
//! - [`ClassDistribution`] - Per-class counts and proportions
//! - [`scan_tree`] - Flat listing of a dataset directory
//!
//! # Example
//!
//! ```
//! use ml_splits::{LabeledDataset, SplitFractions, split_stratified};
//!
//! // 1000 samples, 10 balanced classes
//! let dataset: LabeledDataset<Vec<f32>, u8> = (0..1000)
//!     .map(|i| (vec![0.0; 4], (i % 10) as u8))
//!     .collect();
//!
//! let split = split_stratified(&dataset, SplitFractions::default(), true, Some(42))?;
//! assert_eq!(split.len(), 1000);
//!
//! let (train, val, test) = split.distributions();
//! assert_eq!(train.num_classes(), 10);
//! assert_eq!(val.num_classes(), 10);
//! assert_eq!(test.num_classes(), 10);
//! # Ok::<(), ml_splits::DatasetError>(())
//! ```
//!
//! # Randomness
//!
//! There is no global generator. Every randomized call takes an explicit
//! `Option<u64>` seed, and the same seed always yields the same split.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod dataset;
mod error;
mod scan;
mod splits;
mod stratify;
mod summary;

// Re-export dataset and config types
pub use config::{SplitConfig, SplitFractions};
pub use dataset::LabeledDataset;

// Re-export split utilities
pub use splits::{ThreeWaySplit, split_stratified, split_with_config, train_test_split_stratified};
pub use stratify::{Partition, partition_sizes, stratified_partition};

// Re-export inspection helpers
pub use scan::scan_tree;
pub use summary::ClassDistribution;

// Re-export error types
pub use error::{DatasetError, PartitionError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ClassDistribution, DatasetError, LabeledDataset, Partition, PartitionError, SplitConfig,
        SplitFractions, ThreeWaySplit, scan_tree, split_stratified, split_with_config,
        stratified_partition, train_test_split_stratified,
    };
}
