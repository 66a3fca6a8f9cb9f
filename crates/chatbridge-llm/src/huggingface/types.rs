use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::GenerationParameters;
use crate::error::{InferenceError, Result};

/// Request body for the text-generation task
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

/// Pull the reply out of a text-generation response body
///
/// The body must be a JSON array of candidate objects. The first candidate's
/// `generated_text` is returned untouched.
pub fn extract_generated_text(body: &str) -> Result<String> {
    let candidates: Vec<Map<String, Value>> = serde_json::from_str(body)
        .map_err(|e| InferenceError::ResponseFormat(format!("error parsing response: {}", e)))?;

    let mut first = candidates
        .into_iter()
        .next()
        .ok_or_else(|| InferenceError::ResponseFormat("empty response from API".to_string()))?;

    match first.remove("generated_text") {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(InferenceError::ResponseFormat(format!(
            "generated_text is not a string: {}",
            other
        ))),
        None => Err(InferenceError::ResponseFormat(
            "first candidate has no generated_text".to_string(),
        )),
    }
}
