//! Interpretation of platform response bodies

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Why a reviewed translation could not be unwrapped
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response has no 'content' string")]
    MissingContent,
}

fn percentage(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// Whether language stats report the translation as fully reviewed
pub fn translation_review_completed(stats_text: &str) -> bool {
    let stats: Value = match serde_json::from_str(stats_text) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to read language stats as json. Reason: '{}'.", e);
            return false;
        }
    };

    stats
        .get("reviewed_percentage")
        .and_then(percentage)
        .is_some_and(|p| p >= 100.0)
}

/// Unwrap the translation payload from a reviewed-translation response
pub fn extract_translation(raw: &str) -> Result<String, ExtractError> {
    let envelope: Value =
        serde_json::from_str(raw).map_err(|e| ExtractError::InvalidJson(e.to_string()))?;
    envelope
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ExtractError::MissingContent)
}
