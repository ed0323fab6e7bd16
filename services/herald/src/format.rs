//! Status to notification message translation

use serde_json::Value;

use crate::error::HeraldError;

/// Human-readable verdict for a review status code
pub fn verdict(status: &str) -> Option<&'static str> {
    match status {
        "approved" => Some("Work reviewed: all good, reviewer approved!"),
        "reviewing" => Some("Work has been taken for review."),
        "rejected" => Some("Work reviewed: the reviewer has remarks."),
        _ => None,
    }
}

/// Render a review update as a notification message
pub fn parse_status(update: &Value) -> crate::Result<String> {
    let name = update
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| HeraldError::MissingField("homework_name".to_string()))?;
    let status = update
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| HeraldError::MissingField("status".to_string()))?;

    let verdict =
        verdict(status).ok_or_else(|| HeraldError::UnknownStatus(status.to_string()))?;

    Ok(format!(
        "Changed review status of \"{}\". {}",
        name, verdict
    ))
}
