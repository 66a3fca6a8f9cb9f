use async_trait::async_trait;

use crate::error::Result;

/// Trait for text-generation backends
///
/// One call is one complete, non-streamed generation. Implementations carry
/// no conversation state between calls.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Generate a reply for a single plain-text message
    async fn generate(&self, message: &str) -> Result<String>;

    /// Whether the client holds the credential it needs to make calls
    fn is_configured(&self) -> bool {
        true
    }
}
