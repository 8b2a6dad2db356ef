//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Request failures reported to the caller
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing query parameters")]
    MissingQueryParameters,

    #[error("Missing JSON fields")]
    MissingJsonFields,

    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQueryParameters
            | ApiError::MissingJsonFields
            | ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(InferenceError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Inference(InferenceError::EmptyResponse) => self.to_string(),
            ApiError::Inference(e) => format!("Failed to call inference service: {}", e),
            other => other.to_string(),
        };

        if status.is_server_error() {
            error!("{}", message);
        } else {
            warn!("Rejected request: {}", message);
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
