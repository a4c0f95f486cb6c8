use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::{FeatureOption, ModelOption, PredictionLabel};
use crate::client::{PredictionRequest, PredictionService};

/// Message shown whenever a prediction request fails, whatever the cause.
pub const REQUEST_FAILED_MESSAGE: &str =
    "An error occurred while fetching the prediction. Please try again.";

/// Field values and request lifecycle of one prediction form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub tweet_text: String,
    pub selected_model: Option<ModelOption>,
    pub selected_feature: Option<FeatureOption>,
    pub prediction: Option<PredictionLabel>,
    pub error_message: Option<String>,
    pub is_submitting: bool,
}

/// What the form should currently render below its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormDisplay<'a> {
    Idle,
    Submitting,
    Prediction(PredictionLabel),
    Error(&'a str),
}

/// Result of a single call to [`PredictionController::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Preconditions were not met or a request was already in flight
    Skipped,
    Predicted(PredictionLabel),
    Failed,
}

impl FormState {
    /// Whether a submission would be accepted right now
    pub fn can_submit(&self) -> bool {
        self.ready_selection().is_some()
    }

    /// Names of the form fields that still need a value
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tweet_text.is_empty() {
            missing.push("text");
        }
        if self.selected_model.is_none() {
            missing.push("model");
        }
        if self.selected_feature.is_none() {
            missing.push("feature_type");
        }
        missing
    }

    pub fn display(&self) -> FormDisplay<'_> {
        if self.is_submitting {
            FormDisplay::Submitting
        } else if let Some(label) = self.prediction {
            FormDisplay::Prediction(label)
        } else if let Some(message) = &self.error_message {
            FormDisplay::Error(message)
        } else {
            FormDisplay::Idle
        }
    }

    fn ready_selection(&self) -> Option<(ModelOption, FeatureOption)> {
        if self.is_submitting || self.tweet_text.is_empty() {
            return None;
        }
        Some((self.selected_model?, self.selected_feature?))
    }
}

type Observer = Arc<dyn Fn(&FormState) + Send + Sync>;

/// Owns a [`FormState`] and drives it through the submit lifecycle.
///
/// All operations take `&self`, so a presentation layer can hold the
/// controller in an `Arc` and call it from event handlers. The state lock is
/// never held across the network call; a second `submit` issued while one is
/// in flight sees `is_submitting` and returns [`SubmitOutcome::Skipped`].
///
/// ```rust,no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use disaster_tweet::{ClientConfig, HttpPredictionClient, PredictionController};
///
/// let client = HttpPredictionClient::new(&ClientConfig::from_env()?)?;
/// let form = PredictionController::new(client);
/// form.set_text("Forest fire near La Ronge Sask. Canada");
/// form.set_model("Random Forest".parse()?);
/// form.set_feature("tf_idf".parse()?);
/// form.submit().await;
///
/// if let Some(label) = form.state().prediction {
///     println!("{}", label.description());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PredictionController<S> {
    service: S,
    state: Mutex<FormState>,
    observers: Mutex<Vec<Observer>>,
}

impl<S: PredictionService> PredictionController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Mutex::new(FormState::default()),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Snapshot of the current form state
    pub fn state(&self) -> FormState {
        self.lock_state().clone()
    }

    pub fn can_submit(&self) -> bool {
        self.lock_state().can_submit()
    }

    /// Registers a callback invoked with a fresh snapshot after every change.
    ///
    /// Observers may update the form; the nested change is delivered to every
    /// observer before the outer notification continues.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&FormState) + Send + Sync + 'static,
    {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    pub fn set_text(&self, value: impl Into<String>) {
        self.update(|state| state.tweet_text = value.into());
    }

    pub fn set_model(&self, option: ModelOption) {
        self.update(|state| state.selected_model = Some(option));
    }

    pub fn set_feature(&self, option: FeatureOption) {
        self.update(|state| state.selected_feature = Some(option));
    }

    pub fn clear_model(&self) {
        self.update(|state| state.selected_model = None);
    }

    pub fn clear_feature(&self) {
        self.update(|state| state.selected_feature = None);
    }

    /// Sends the current fields to the prediction service and records the result.
    ///
    /// Does nothing when a field is empty or another submission is in flight.
    /// Otherwise previous results are cleared before the request goes out, and
    /// exactly one of `prediction` or `error_message` is set once it resolves.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.lock_state();
            let Some((model, feature)) = state.ready_selection() else {
                log::debug!("Submit ignored (missing: {:?}, in flight: {})", state.missing_fields(), state.is_submitting);
                return SubmitOutcome::Skipped;
            };
            state.is_submitting = true;
            state.prediction = None;
            state.error_message = None;
            PredictionRequest::new(state.tweet_text.clone(), model, feature)
        };
        self.notify();

        let mut in_flight = InFlight { controller: self, armed: true };
        log::info!("Requesting prediction (model: {}, feature_type: {})", request.model, request.feature_type);
        let result = self.service.predict(&request).await;

        let outcome = {
            let mut state = self.lock_state();
            let outcome = match result {
                Ok(label) => {
                    log::info!("Prediction received: {}", label);
                    state.prediction = Some(label);
                    SubmitOutcome::Predicted(label)
                }
                Err(e) => {
                    log::warn!("Prediction request failed");
                    log::debug!("Cause: {}", e);
                    state.error_message = Some(REQUEST_FAILED_MESSAGE.to_string());
                    SubmitOutcome::Failed
                }
            };
            state.is_submitting = false;
            in_flight.armed = false;
            outcome
        };
        self.notify();
        outcome
    }

    fn update(&self, apply: impl FnOnce(&mut FormState)) {
        apply(&mut self.lock_state());
        self.notify();
    }
}

impl<S> PredictionController<S> {
    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        let snapshot = self.lock_state().clone();
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in &observers {
            observer(&snapshot);
        }
    }
}

/// Clears `is_submitting` if a submit future is dropped before its request
/// resolves.
struct InFlight<'a, S> {
    controller: &'a PredictionController<S>,
    armed: bool,
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("Submission dropped while in flight");
            self.controller.lock_state().is_submitting = false;
            self.controller.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PredictionError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Answers every request with a fixed result, optionally waiting for a release signal
    struct ScriptedService {
        label: Option<PredictionLabel>,
        gate: Option<Notify>,
        calls: AtomicUsize,
        last_request: Mutex<Option<PredictionRequest>>,
    }

    impl ScriptedService {
        fn answering(label: PredictionLabel) -> Self {
            Self {
                label: Some(label),
                gate: None,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                label: None,
                ..Self::answering(PredictionLabel::Negative)
            }
        }

        fn gated(mut self) -> Self {
            self.gate = Some(Notify::new());
            self
        }

        fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PredictionService for ScriptedService {
        async fn predict(&self, request: &PredictionRequest) -> Result<PredictionLabel, PredictionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.label
                .ok_or(PredictionError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }

    fn filled<S: PredictionService>(service: S) -> PredictionController<S> {
        let controller = PredictionController::new(service);
        controller.set_text("Fire downtown");
        controller.set_model("Random Forest".parse().unwrap());
        controller.set_feature("tf_idf".parse().unwrap());
        controller
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let controller = filled(ScriptedService::answering(PredictionLabel::Positive));
        assert_eq!(controller.submit().await, SubmitOutcome::Predicted(PredictionLabel::Positive));

        let state = controller.state();
        assert_eq!(state.prediction, Some(PredictionLabel::Positive));
        assert!(state.error_message.is_none());
        assert!(!state.is_submitting);
        assert_eq!(state.display(), FormDisplay::Prediction(PredictionLabel::Positive));

        let request = controller.service().last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.text, "Fire downtown");
        assert_eq!(request.model, "Random Forest");
        assert_eq!(request.feature_type, "tf_idf");
    }

    #[tokio::test]
    async fn test_failed_submission() {
        let controller = filled(ScriptedService::failing());
        assert_eq!(controller.submit().await, SubmitOutcome::Failed);

        let state = controller.state();
        assert!(state.prediction.is_none());
        assert_eq!(state.error_message.as_deref(), Some(REQUEST_FAILED_MESSAGE));
        assert!(!state.is_submitting);
        assert_eq!(state.display(), FormDisplay::Error(REQUEST_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_submit_skipped_when_fields_missing() {
        let controller = PredictionController::new(ScriptedService::answering(PredictionLabel::Positive));
        assert_eq!(controller.submit().await, SubmitOutcome::Skipped);

        controller.set_model("KNN".parse().unwrap());
        controller.set_feature("word2vec".parse().unwrap());
        let before = controller.state();
        assert_eq!(before.missing_fields(), vec!["text"]);
        assert_eq!(controller.submit().await, SubmitOutcome::Skipped);
        assert_eq!(controller.state(), before);

        controller.set_text("Flood warning");
        assert!(controller.can_submit());
        controller.clear_model();
        assert!(!controller.can_submit());
        assert_eq!(controller.submit().await, SubmitOutcome::Skipped);

        controller.set_model("Bayes".parse().unwrap());
        controller.clear_feature();
        assert!(!controller.can_submit());
        assert_eq!(controller.submit().await, SubmitOutcome::Skipped);
        assert_eq!(controller.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_resubmission_clears_previous_result() {
        let controller = filled(ScriptedService::failing().gated());
        controller.service().release();
        controller.submit().await;
        assert!(controller.state().error_message.is_some());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

        controller.service().release();
        controller.submit().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_submitting);
        assert!(seen[0].error_message.is_none());
        assert!(seen[0].prediction.is_none());
        assert!(!seen[1].is_submitting);
        assert_eq!(seen[1].error_message.as_deref(), Some(REQUEST_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_ignored() {
        let controller = filled(ScriptedService::answering(PredictionLabel::Negative).gated());

        let first = controller.submit();
        let second = async {
            while !controller.state().is_submitting {
                tokio::task::yield_now().await;
            }
            assert!(!controller.can_submit());
            let outcome = controller.submit().await;
            controller.service().release();
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, SubmitOutcome::Predicted(PredictionLabel::Negative));
        assert_eq!(second, SubmitOutcome::Skipped);
        assert_eq!(controller.service().calls(), 1);
        assert_eq!(controller.state().prediction, Some(PredictionLabel::Negative));
    }

    #[tokio::test]
    async fn test_dropped_submission_clears_in_flight_flag() {
        let controller = filled(ScriptedService::answering(PredictionLabel::Positive).gated());

        let result = tokio::time::timeout(Duration::from_millis(20), controller.submit()).await;
        assert!(result.is_err());

        let state = controller.state();
        assert!(!state.is_submitting);
        assert!(state.prediction.is_none());
        assert!(state.error_message.is_none());
        assert!(controller.can_submit());
    }

    #[test]
    fn test_observer_can_update_form() {
        let controller = PredictionController::new(ScriptedService::answering(PredictionLabel::Positive));
        let form = Arc::new(controller);
        let weak = Arc::downgrade(&form);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        form.subscribe(move |state| {
            sink.lock().unwrap().push(state.tweet_text.clone());
            if state.tweet_text == "a" {
                if let Some(form) = weak.upgrade() {
                    form.set_text("b");
                }
            }
        });

        form.set_text("a");

        assert_eq!(form.state().tweet_text, "b");
        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_display_idle_by_default() {
        let state = FormState::default();
        assert_eq!(state.display(), FormDisplay::Idle);
        assert_eq!(state.missing_fields(), vec!["text", "model", "feature_type"]);
    }
}
