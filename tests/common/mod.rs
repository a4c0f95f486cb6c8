#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use env_logger::{Builder, Env};

// Initialize test logger
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

/// A request as seen by the stand-in prediction endpoint
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Stand-in for the remote prediction service, answering every request the same way.
#[derive(Clone)]
pub struct MockEndpoint {
    pub url: String,
    status: StatusCode,
    body: &'static str,
    delay: Option<Duration>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockEndpoint {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with_delay(status, body, None).await
    }

    pub async fn start_with_delay(status: StatusCode, body: &'static str, delay: Option<Duration>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock endpoint");
        let addr = listener.local_addr().expect("Mock endpoint has no address");

        let endpoint = Self {
            url: format!("http://{}/predict", addr),
            status,
            body,
            delay,
            received: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/predict", post(predict))
            .with_state(endpoint.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock endpoint stopped");
        });

        endpoint
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

async fn predict(State(endpoint): State<MockEndpoint>, headers: HeaderMap, body: String) -> (StatusCode, &'static str) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    endpoint.received.lock().unwrap().push(ReceivedRequest { content_type, body });

    if let Some(delay) = endpoint.delay {
        tokio::time::sleep(delay).await;
    }
    (endpoint.status, endpoint.body)
}
