use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{PredictionError, PredictionRequest, PredictionResponse, PredictionService};
use crate::catalog::PredictionLabel;
use crate::config::ClientConfig;

/// Posts prediction requests to the remote classifier over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    endpoint: Url,
}

impl HttpPredictionClient {
    pub fn new(config: &ClientConfig) -> Result<Self, PredictionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionLabel, PredictionError> {
        log::debug!("POST {} (model: {}, feature_type: {})", self.endpoint, request.model, request.feature_type);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("Prediction response status: {}", status);
        if !status.is_success() {
            return Err(PredictionError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: PredictionResponse = serde_json::from_slice(&body)?;
        Ok(parsed.prediction)
    }
}
