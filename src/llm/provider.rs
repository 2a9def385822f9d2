use async_trait::async_trait;

use crate::types::AppResult;

/// Object-safe seam around the generative-text API. The production adapter
/// talks to Gemini; tests substitute recording mocks.
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    /// Run a single prompt to completion and return the model's text.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
