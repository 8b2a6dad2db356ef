//! Inbound Payload Decoding
//!
//! Turns query strings and JSON bodies into [`InputRecord`]s. Values are kept
//! as text; checking that they are numeric is left to the scoring service.

use crate::error::ApiError;
use feature_engine::InputRecord;
use serde_json::Value;

/// Build a record from query pairs in the order they appeared
pub fn record_from_query(pairs: Vec<(String, String)>) -> Result<InputRecord, ApiError> {
    let record: InputRecord = pairs.into_iter().collect();
    if record.is_empty() {
        return Err(ApiError::MissingQueryParameters);
    }
    Ok(record)
}

/// Build a record from a flat JSON object.
///
/// String values are taken verbatim, numbers and booleans by their JSON text.
pub fn record_from_json(body: &[u8]) -> Result<InputRecord, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingJsonFields);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedJson(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(ApiError::MalformedJson("expected a JSON object".to_string()));
    };

    let mut record = InputRecord::new();
    for (name, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(ApiError::MalformedJson(format!(
                    "field '{}' must be a string or number",
                    name
                )))
            }
        };
        record.insert(name, text);
    }

    if record.is_empty() {
        return Err(ApiError::MissingJsonFields);
    }
    Ok(record)
}
