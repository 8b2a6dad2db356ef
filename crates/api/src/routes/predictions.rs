//! Prediction Routes

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use feature_engine::InputRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::input::{record_from_json, record_from_query};
use crate::AppState;

/// Response for prediction endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

/// Predict from query parameters, e.g. `/predict?mean_radius=17.99&mean_area=1001`
pub async fn predict_from_query(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let record = record_from_query(pairs)?;
    score(&state, record).await
}

/// Predict from a flat JSON object body
pub async fn predict_from_json(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let record = record_from_json(&body)?;
    score(&state, record).await
}

async fn score(state: &AppState, record: InputRecord) -> Result<Json<PredictionResponse>, ApiError> {
    let assembly = state.assembler.assemble_with_report(&record);
    debug!(
        supplied = record.len(),
        defaulted = assembly.defaulted,
        unknown = assembly.unknown,
        "Assembled feature vector"
    );

    let result = state.engine.predict(&assembly.vector).await?;
    debug!("Prediction {} in {}ms", result.prediction, result.latency_ms);

    Ok(Json(PredictionResponse {
        prediction: result.prediction,
    }))
}
