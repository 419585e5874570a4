pub mod gemini;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::Value;

pub use gemini::GeminiClient;

/// Remote model seam. One call in, the model's raw reply text out.
#[async_trait]
pub trait LLMClient {
    /// Ask for a single JSON value shaped by `response_schema`.
    async fn generate_json(
        &self,
        config: &LLMConfig,
        system: &str,
        user: &str,
        response_schema: &Value,
    ) -> Result<String>;
}
