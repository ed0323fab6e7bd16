//! Poll response validation

use serde_json::Value;

use crate::error::HeraldError;

/// Extract the most recent update from a poll response.
///
/// The response must be a JSON object carrying both `homeworks` (an array,
/// newest first) and `current_date`. An empty array is the expected quiet
/// outcome and reported as `NoUpdates`.
pub fn first_update(response: &Value) -> crate::Result<Value> {
    let fields = response.as_object().ok_or_else(|| {
        HeraldError::MalformedResponse(format!("expected a JSON object, got {}", kind(response)))
    })?;

    for required in ["homeworks", "current_date"] {
        if !fields.contains_key(required) {
            return Err(HeraldError::MissingField(required.to_string()));
        }
    }

    let updates = fields["homeworks"].as_array().ok_or_else(|| {
        HeraldError::MalformedResponse(format!(
            "expected 'homeworks' to be an array, got {}",
            kind(&fields["homeworks"])
        ))
    })?;

    match updates.first() {
        Some(update) => Ok(update.clone()),
        None => Err(HeraldError::NoUpdates),
    }
}

/// Cursor watermark carried by the response, if any.
///
/// Kept separate from [`first_update`] so the caller can advance its cursor
/// even on cycles that end in `NoUpdates`.
pub fn current_date(response: &Value) -> Option<u64> {
    response.get("current_date")?.as_u64()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
