//! Client-side form controller for a remote tweet disaster classifier.
//!
//! The crate holds the form fields (tweet text, model, feature extraction
//! method), sends them to the prediction service and turns the answer into
//! something a presentation layer can render.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use disaster_tweet::{ClientConfig, HttpPredictionClient, PredictionController, SubmitOutcome};
//!
//! let client = HttpPredictionClient::new(&ClientConfig::default())?;
//! let form = PredictionController::new(client);
//! form.set_text("Fire downtown");
//! form.set_model("Random Forest".parse()?);
//! form.set_feature("tf_idf".parse()?);
//!
//! match form.submit().await {
//!     SubmitOutcome::Predicted(label) => println!("{}", label.description()),
//!     SubmitOutcome::Failed => println!("{}", form.state().error_message.unwrap_or_default()),
//!     SubmitOutcome::Skipped => println!("Missing: {:?}", form.state().missing_fields()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Observing state
//!
//! Every change to the form is pushed to subscribers as a [`FormState`]
//! snapshot:
//!
//! ```rust
//! # use async_trait::async_trait;
//! # use disaster_tweet::{PredictionController, PredictionError, PredictionLabel, PredictionRequest, PredictionService};
//! # struct AlwaysPositive;
//! # #[async_trait]
//! # impl PredictionService for AlwaysPositive {
//! #     async fn predict(&self, _: &PredictionRequest) -> Result<PredictionLabel, PredictionError> {
//! #         Ok(PredictionLabel::Positive)
//! #     }
//! # }
//! let form = PredictionController::new(AlwaysPositive);
//! form.subscribe(|state| println!("submitting: {}", state.is_submitting));
//! form.set_text("Earthquake felt in the city");
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod labels;

pub use catalog::{CatalogError, FeatureOption, ModelOption, PredictionLabel, FEATURE_OPTIONS, MODEL_OPTIONS};
pub use client::{HttpPredictionClient, PredictionError, PredictionRequest, PredictionResponse, PredictionService};
pub use config::{ClientConfig, ConfigError};
pub use controller::{FormDisplay, FormState, PredictionController, SubmitOutcome, REQUEST_FAILED_MESSAGE};

pub fn init_logger() {
    env_logger::init();
}
