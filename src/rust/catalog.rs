use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised when a name does not match any catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),
    #[error("Unknown feature type: {0}")]
    UnknownFeature(String),
}

/// A classification model the remote service can be asked to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelOption {
    name: &'static str,
}

impl ModelOption {
    const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The identifier sent on the wire and shown to the user
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ModelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for ModelOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODEL_OPTIONS
            .iter()
            .copied()
            .find(|option| option.name == s)
            .ok_or_else(|| CatalogError::UnknownModel(s.to_string()))
    }
}

/// A text-vectorization method, identified by `value` and shown as `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureOption {
    value: &'static str,
    label: &'static str,
}

impl FeatureOption {
    const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }

    /// The identifier sent as `feature_type`
    pub fn value(&self) -> &'static str {
        self.value
    }

    /// Human-readable name of the method
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Display for FeatureOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl FromStr for FeatureOption {
    type Err = CatalogError;

    /// Accepts the value identifier, or the display label ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FEATURE_OPTIONS
            .iter()
            .copied()
            .find(|option| option.value == s || option.label.eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::UnknownFeature(s.to_string()))
    }
}

/// Models offered by the form, in display order.
pub const MODEL_OPTIONS: [ModelOption; 7] = [
    ModelOption::new("KNN"),
    ModelOption::new("Bayes"),
    ModelOption::new("Decision Tree"),
    ModelOption::new("Random Forest"),
    ModelOption::new("Logistic Regression"),
    ModelOption::new("SVM Linear"),
    ModelOption::new("SVM Non-linear"),
];

/// Feature extraction methods offered by the form, in display order.
pub const FEATURE_OPTIONS: [FeatureOption; 3] = [
    FeatureOption::new("tf_idf", "TF-IDF"),
    FeatureOption::new("word2vec", "Word To Vector"),
    FeatureOption::new("bag_of_words", "Bag Of Words"),
];

/// The two-valued outcome returned by the prediction service.
///
/// Deserialization only accepts the exact strings `"Positive"` and
/// `"Negative"`, so any other label in a response is a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionLabel {
    Positive,
    Negative,
}

impl PredictionLabel {
    /// Localized description displayed for this label
    pub fn description(&self) -> &'static str {
        match self {
            Self::Positive => "Có liên quan đến thảm họa",
            Self::Negative => "Không liên quan đến thảm họa",
        }
    }

    /// Whether the tweet was classified as disaster related
    pub fn is_disaster(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("Positive"),
            Self::Negative => f.write_str("Negative"),
        }
    }
}
