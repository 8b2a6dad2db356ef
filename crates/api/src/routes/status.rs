//! Status Route

use axum::Json;
use serde::Serialize;

/// Liveness answer
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub code: String,
}

/// Report that the service is up
pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        code: "200".to_string(),
    })
}
