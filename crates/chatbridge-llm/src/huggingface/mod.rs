pub mod client;
pub mod types;

pub use client::{HuggingFaceClient, HuggingFaceClientBuilder};
pub use types::{extract_generated_text, GenerationRequest};
