//! Inference Client
//!
//! Sends assembled feature vectors to the external scoring service and
//! interprets what comes back.

mod engine;
mod http;
mod response;

pub use engine::{InferenceEngine, InferenceResult, MockReply, MOCK_PAYLOAD_HISTORY};
pub use http::HttpBackendConfig;
pub use response::interpret_response;

use thiserror::Error;

/// Errors while scoring a feature vector
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference service unreachable: {0}")]
    Transport(String),
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),
    #[error("Inference service returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("Empty response from inference service")]
    EmptyResponse,
    #[error("Invalid response from inference service: {0}")]
    InvalidResponse(String),
    #[error("Invalid inference configuration: {0}")]
    Configuration(String),
}
