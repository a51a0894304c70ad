//! Split configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Fractions of a dataset assigned to the train, validation and test subsets.
///
/// The three fractions must add up to exactly `1.0`. No tolerance is
/// applied: callers pass values whose floating-point sum is `1.0`.
///
/// # Example
///
/// ```
/// use ml_splits::SplitFractions;
///
/// let fractions = SplitFractions::new(0.7, 0.15, 0.15);
/// assert!(fractions.validate().is_ok());
///
/// let bad = SplitFractions::new(0.7, 0.15, 0.14);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    /// Fraction for the training subset.
    pub train: f64,

    /// Fraction for the validation subset.
    pub val: f64,

    /// Fraction for the test subset.
    pub test: f64,
}

impl SplitFractions {
    /// Common 70/15/15 split.
    pub const SEVENTY_FIFTEEN_FIFTEEN: Self = Self::new(0.7, 0.15, 0.15);

    /// Common 80/10/10 split.
    pub const EIGHTY_TEN_TEN: Self = Self::new(0.8, 0.1, 0.1);

    /// Common 60/20/20 split.
    pub const SIXTY_TWENTY_TWENTY: Self = Self::new(0.6, 0.2, 0.2);

    /// Creates a new set of fractions. Use [`validate`](Self::validate) to check them.
    #[must_use]
    pub const fn new(train: f64, val: f64, test: f64) -> Self {
        Self { train, val, test }
    }

    /// Returns the sum of the three fractions.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.train + self.val + self.test
    }

    /// Checks that the fractions are non-negative and add up to exactly `1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Configuration`] otherwise.
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<()> {
        if self.train < 0.0 || self.val < 0.0 || self.test < 0.0 {
            return Err(DatasetError::configuration(format!(
                "fractions {}, {}, {} must be non-negative",
                self.train, self.val, self.test
            )));
        }
        if self.sum() != 1.0 {
            return Err(DatasetError::configuration(format!(
                "fractions {:.6}, {:.6}, {:.6} do not add up to 1.0",
                self.train, self.val, self.test
            )));
        }
        Ok(())
    }

    /// Fraction of the non-train remainder that goes to the test subset.
    #[must_use]
    pub fn relative_test(&self) -> f64 {
        self.test / (self.val + self.test)
    }
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self::SEVENTY_FIFTEEN_FIFTEEN
    }
}

/// Configuration for a stratified three-way split.
///
/// # Example
///
/// ```
/// use ml_splits::{SplitConfig, SplitFractions};
///
/// let config = SplitConfig::default()
///     .with_fractions(SplitFractions::EIGHTY_TEN_TEN)
///     .with_shuffle(true)
///     .with_seed(42);
///
/// assert!(config.shuffle);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Subset fractions.
    #[serde(default)]
    pub fractions: SplitFractions,

    /// Whether to randomize membership within each class.
    #[serde(default)]
    pub shuffle: bool,

    /// Random seed for reproducibility (ignored when not shuffling).
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            fractions: SplitFractions::default(),
            shuffle: false,
            seed: None,
        }
    }
}

impl SplitConfig {
    /// Creates a config with the given fractions and no shuffling.
    #[must_use]
    pub const fn new(fractions: SplitFractions) -> Self {
        Self {
            fractions,
            shuffle: false,
            seed: None,
        }
    }

    /// Sets the fractions.
    #[must_use]
    pub const fn with_fractions(mut self, fractions: SplitFractions) -> Self {
        self.fractions = fractions;
        self
    }

    /// Sets the shuffle flag.
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Configuration`] if the fractions are invalid.
    pub fn validate(&self) -> Result<()> {
        self.fractions.validate()
    }

    /// Parses a config from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON, or a configuration
    /// error if the parsed fractions are invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fractions_default() {
        let fractions = SplitFractions::default();
        assert_relative_eq!(fractions.train, 0.7);
        assert_relative_eq!(fractions.val, 0.15);
        assert_relative_eq!(fractions.test, 0.15);
        assert!(fractions.validate().is_ok());
    }

    #[test]
    fn fractions_constants_are_valid() {
        assert!(SplitFractions::SEVENTY_FIFTEEN_FIFTEEN.validate().is_ok());
        assert!(SplitFractions::EIGHTY_TEN_TEN.validate().is_ok());
        assert!(SplitFractions::SIXTY_TWENTY_TWENTY.validate().is_ok());
    }

    #[test]
    fn fractions_not_summing_to_one() {
        let err = SplitFractions::new(0.7, 0.15, 0.14).validate();
        assert!(matches!(err, Err(DatasetError::Configuration(_))));

        let err = SplitFractions::new(0.5, 0.5, 0.5).validate();
        assert!(matches!(err, Err(DatasetError::Configuration(_))));
    }

    #[test]
    fn fractions_negative() {
        let err = SplitFractions::new(1.25, -0.5, 0.25).validate();
        assert!(matches!(err, Err(DatasetError::Configuration(ref m)) if m.contains("non-negative")));
    }

    #[test]
    fn fractions_relative_test() {
        assert_relative_eq!(SplitFractions::new(0.5, 0.25, 0.25).relative_test(), 0.5);
        assert_relative_eq!(SplitFractions::new(0.6, 0.1, 0.3).relative_test(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn config_builder() {
        let config = SplitConfig::new(SplitFractions::EIGHTY_TEN_TEN)
            .with_shuffle(true)
            .with_seed(7);

        assert_eq!(config.fractions, SplitFractions::EIGHTY_TEN_TEN);
        assert!(config.shuffle);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn config_default() {
        let config = SplitConfig::default();
        assert!(!config.shuffle);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_json_roundtrip() {
        let config = SplitConfig::default().with_shuffle(true).with_seed(42);
        let json = config.to_json();
        assert!(json.is_ok());

        let parsed = SplitConfig::from_json(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        if let Ok(c) = parsed {
            assert_eq!(c, config);
        }
    }

    #[test]
    fn config_from_json_partial() {
        let parsed = SplitConfig::from_json(r#"{"shuffle": true}"#);
        assert!(parsed.is_ok());
        if let Ok(c) = parsed {
            assert!(c.shuffle);
            assert_eq!(c.fractions, SplitFractions::default());
        }
    }

    #[test]
    fn config_from_json_rejects_bad_fractions() {
        let parsed =
            SplitConfig::from_json(r#"{"fractions": {"train": 0.7, "val": 0.15, "test": 0.14}}"#);
        assert!(matches!(parsed, Err(DatasetError::Configuration(_))));
    }

    #[test]
    fn config_from_json_malformed() {
        let parsed = SplitConfig::from_json("{not json");
        assert!(matches!(parsed, Err(DatasetError::Serialization(_))));
    }
}
