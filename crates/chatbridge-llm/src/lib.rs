pub mod config;
pub mod error;
pub mod huggingface;
pub mod prompt;
pub mod traits;

pub use config::{GenerationParameters, HuggingFaceConfig, DEFAULT_MODEL_URL, HUGGINGFACE_API_KEY_ENV};
pub use error::{InferenceError, Result};
pub use huggingface::{HuggingFaceClient, HuggingFaceClientBuilder};
pub use prompt::{PromptTemplate, DEFAULT_PROMPT_TEMPLATE};
pub use traits::InferenceClient;
