use reqwest::StatusCode;

/// A failed prediction request.
///
/// Callers treat every variant the same way; the variants only exist so the
/// cause can be logged.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Prediction request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Prediction request failed with status {0}")]
    Status(StatusCode),
    #[error("Prediction response could not be parsed: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
