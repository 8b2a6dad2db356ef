//! Inference Engine Implementation

use crate::http::{HttpBackend, HttpBackendConfig};
use crate::response::interpret_response;
use crate::InferenceError;
use feature_engine::FeatureVector;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{debug, info};

/// Payloads a mock backend keeps, newest last
pub const MOCK_PAYLOAD_HISTORY: usize = 64;

/// Canned behaviour of the in-process backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Answer every request with this body
    Fixed(String),
    /// Answer with an empty body
    Empty,
    /// Fail every request with a transport error
    Fail(String),
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Prediction as relayed by the scoring service
    pub prediction: String,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

enum Backend {
    Http(HttpBackend),
    Mock {
        reply: MockReply,
        received: Mutex<VecDeque<String>>,
    },
}

/// Client for the external scoring service
pub struct InferenceEngine {
    backend: Backend,
    /// JSON field holding the prediction in structured responses
    prediction_field: String,
}

impl InferenceEngine {
    /// Create an engine that calls the scoring service over HTTP
    pub fn http(
        config: HttpBackendConfig,
        prediction_field: impl Into<String>,
    ) -> Result<Self, InferenceError> {
        Ok(Self {
            backend: Backend::Http(HttpBackend::new(config)?),
            prediction_field: prediction_field.into(),
        })
    }

    /// Create an in-process engine for development and tests
    pub fn mock(reply: MockReply, prediction_field: impl Into<String>) -> Self {
        info!("Creating mock inference engine: {:?}", reply);
        Self {
            backend: Backend::Mock {
                reply,
                received: Mutex::new(VecDeque::with_capacity(MOCK_PAYLOAD_HISTORY)),
            },
            prediction_field: prediction_field.into(),
        }
    }

    /// Score one feature vector.
    ///
    /// The vector travels as a single CSV row in schema order.
    pub async fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();
        let payload = features.to_csv_line();

        let body = match &self.backend {
            Backend::Http(http) => http.invoke(payload).await?,
            Backend::Mock { reply, received } => {
                if let Ok(mut log) = received.lock() {
                    if log.len() == MOCK_PAYLOAD_HISTORY {
                        log.pop_front();
                    }
                    log.push_back(payload);
                }
                match reply {
                    MockReply::Fixed(body) => body.clone().into_bytes(),
                    MockReply::Empty => Vec::new(),
                    MockReply::Fail(reason) => {
                        return Err(InferenceError::Transport(reason.clone()))
                    }
                }
            }
        };

        let prediction = interpret_response(&body, &self.prediction_field)?;
        let latency_ms = start.elapsed().as_millis() as u64;
        debug!("Inference completed in {}ms", latency_ms);

        Ok(InferenceResult {
            prediction,
            latency_ms,
        })
    }

    /// Short description of the backend, for logs and status output
    pub fn describe(&self) -> String {
        match &self.backend {
            Backend::Http(http) => format!("http {}", http.endpoint()),
            Backend::Mock { .. } => "mock".to_string(),
        }
    }

    /// Most recent payloads received by a mock backend, oldest first.
    /// Empty for HTTP.
    pub fn received_payloads(&self) -> Vec<String> {
        match &self.backend {
            Backend::Mock { received, .. } => received
                .lock()
                .map(|log| log.iter().cloned().collect())
                .unwrap_or_default(),
            Backend::Http(_) => Vec::new(),
        }
    }
}
