use async_trait::async_trait;

mod error;
mod http;
mod wire;

pub use error::PredictionError;
pub use http::HttpPredictionClient;
pub use wire::{PredictionRequest, PredictionResponse};

use crate::catalog::PredictionLabel;

/// Something that can classify a tweet for the form controller.
///
/// [`HttpPredictionClient`] is the production implementation; tests plug in
/// their own to script responses.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionLabel, PredictionError>;
}
