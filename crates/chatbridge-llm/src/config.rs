// Configuration for the hosted inference endpoint and the fixed generation settings

use serde::{Deserialize, Serialize};

/// Environment variable holding the bearer credential
pub const HUGGINGFACE_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Hosted model the relay talks to unless configured otherwise
pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/nvidia/Llama-3.1-Nemotron-70B-Instruct-HF";

/// Generation settings sent with every request
///
/// These are constants of the relay, not derived from user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: 300,
            temperature: 0.7,
            top_p: 0.95,
            repetition_penalty: 1.15,
            return_full_text: false,
        }
    }
}

/// Endpoint and credential for a Hugging Face inference client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    pub model_url: String,
    /// Bearer credential; absence is only detected when a call is made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl HuggingFaceConfig {
    pub fn new(model_url: impl Into<String>) -> Self {
        Self {
            model_url: model_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Default model URL with the credential read from `HUGGINGFACE_API_KEY`
    pub fn from_env() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
            api_key: std::env::var(HUGGINGFACE_API_KEY_ENV).ok(),
        }
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_serialize_to_wire_shape() {
        let value = serde_json::to_value(GenerationParameters::default()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "max_length": 300,
                "temperature": 0.7,
                "top_p": 0.95,
                "repetition_penalty": 1.15,
                "return_full_text": false
            })
        );
    }

    #[test]
    fn test_config_builder() {
        let config = HuggingFaceConfig::new("http://localhost:8080/model").with_api_key("hf_test");

        assert_eq!(config.model_url, "http://localhost:8080/model");
        assert_eq!(config.api_key.as_deref(), Some("hf_test"));
    }

    #[test]
    fn test_default_points_at_hosted_model() {
        let config = HuggingFaceConfig::default();
        assert_eq!(config.model_url, DEFAULT_MODEL_URL);
        assert!(config.api_key.is_none());
    }
}
