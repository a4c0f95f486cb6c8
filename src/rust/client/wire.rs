use serde::{Deserialize, Serialize};

use crate::catalog::{FeatureOption, ModelOption, PredictionLabel};

/// JSON body posted to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub text: String,
    pub model: String,
    pub feature_type: String,
}

impl PredictionRequest {
    pub fn new(text: impl Into<String>, model: ModelOption, feature: FeatureOption) -> Self {
        Self {
            text: text.into(),
            model: model.name().to_string(),
            feature_type: feature.value().to_string(),
        }
    }
}

/// JSON body returned by the prediction endpoint on success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictionResponse {
    pub prediction: PredictionLabel,
}
