//! HTTP Scoring Backend

use crate::InferenceError;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Where and how to reach the scoring service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpBackendConfig {
    /// Invocation URL; receives the CSV row as the request body
    pub endpoint: String,
    /// Content type announced for the row
    pub content_type: String,
    /// Per-request timeout (ms)
    pub timeout_ms: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8081/invocations".to_string(),
            content_type: "text/csv".to_string(),
            timeout_ms: 5000,
        }
    }
}

pub(crate) struct HttpBackend {
    client: Client,
    endpoint: Url,
    config: HttpBackendConfig,
}

impl HttpBackend {
    pub(crate) fn new(config: HttpBackendConfig) -> Result<Self, InferenceError> {
        let endpoint = Url::parse(config.endpoint.trim()).map_err(|e| {
            InferenceError::Configuration(format!("endpoint '{}': {}", config.endpoint, e))
        })?;

        if config.timeout_ms == 0 {
            return Err(InferenceError::Configuration(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::Configuration(e.to_string()))?;

        info!(
            "HTTP inference backend: endpoint={}, timeout={}ms",
            endpoint, config.timeout_ms
        );

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST one CSV row and return the raw response body
    pub(crate) async fn invoke(&self, payload: String) -> Result<Vec<u8>, InferenceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, self.config.content_type.as_str())
            .header(ACCEPT, "application/json, text/plain")
            .body(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!("Inference service answered {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(InferenceError::UpstreamStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        Ok(body.to_vec())
    }

    fn classify(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.config.timeout_ms)
        } else {
            InferenceError::Transport(err.to_string())
        }
    }
}
