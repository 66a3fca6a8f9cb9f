use thiserror::Error;

/// Failure of a single inference call.
///
/// Every variant is scoped to one turn: callers log it and move on.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),
}

pub type Result<T> = std::result::Result<T, InferenceError>;
