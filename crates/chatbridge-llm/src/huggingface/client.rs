// Hugging Face hosted inference client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::config::{GenerationParameters, HuggingFaceConfig, DEFAULT_MODEL_URL};
use crate::error::{InferenceError, Result};
use crate::huggingface::types::{extract_generated_text, GenerationRequest};
use crate::prompt::PromptTemplate;
use crate::traits::InferenceClient;

/// Client for a single hosted text-generation model
///
/// The credential is optional at construction time. A missing credential is
/// reported by [`InferenceClient::generate`] before any request goes out.
#[derive(Debug)]
pub struct HuggingFaceClient {
    http_client: reqwest::Client,
    model_url: String,
    api_key: Option<String>,
    prompt: PromptTemplate,
    parameters: GenerationParameters,
}

impl HuggingFaceClient {
    /// Create new client with builder pattern
    pub fn builder() -> HuggingFaceClientBuilder {
        HuggingFaceClientBuilder::default()
    }

    /// Create client from endpoint configuration with default prompt and parameters
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        let mut builder = Self::builder().model_url(config.model_url);
        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }
        builder.build()
    }

    /// Create client for the default model, credential from `HUGGINGFACE_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::new(HuggingFaceConfig::from_env())
    }

    pub fn model_url(&self) -> &str {
        &self.model_url
    }

    /// Build the request payload for one message
    pub fn build_request(&self, message: &str) -> GenerationRequest {
        GenerationRequest {
            inputs: self.prompt.render(message),
            parameters: self.parameters.clone(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                InferenceError::Configuration(format!(
                    "{} not set in environment",
                    crate::config::HUGGINGFACE_API_KEY_ENV
                ))
            })
    }
}

#[derive(Default)]
pub struct HuggingFaceClientBuilder {
    model_url: Option<String>,
    api_key: Option<String>,
    prompt: Option<PromptTemplate>,
    parameters: Option<GenerationParameters>,
}

impl HuggingFaceClientBuilder {
    /// Full URL of the hosted model
    /// Example: "https://api-inference.huggingface.co/models/gpt2"
    pub fn model_url(mut self, model_url: impl Into<String>) -> Self {
        self.model_url = Some(model_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt = Some(PromptTemplate::new(template));
        self
    }

    pub fn parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn build(self) -> Result<HuggingFaceClient> {
        let model_url = self
            .model_url
            .unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // No request timeout: a stalled endpoint stalls only the calling turn
        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                InferenceError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(HuggingFaceClient {
            http_client,
            model_url,
            api_key: self.api_key,
            prompt: self.prompt.unwrap_or_default(),
            parameters: self.parameters.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn generate(&self, message: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let payload = self.build_request(message);

        let response = self
            .http_client
            .post(&self.model_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, body = %body, "Raw inference response");

        if !status.is_success() {
            return Err(InferenceError::ResponseFormat(format!(
                "inference API error ({}): {}",
                status, body
            )));
        }

        extract_generated_text(&body)
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }
}
