//! Scoring Response Interpretation

use crate::InferenceError;
use serde_json::Value;

/// Extract the prediction from a scoring service response body.
///
/// A JSON object carrying `field` yields that field; any other body (a bare
/// scalar such as `0.97`, or JSON without the field) is relayed as trimmed text.
pub fn interpret_response(body: &[u8], field: &str) -> Result<String, InferenceError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| InferenceError::InvalidResponse(format!("body is not UTF-8: {}", e)))?
        .trim();

    if text.is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        if let Some(value) = map.get(field) {
            let prediction = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            if prediction.is_empty() {
                return Err(InferenceError::EmptyResponse);
            }
            return Ok(prediction);
        }
    }

    Ok(text.to_string())
}
