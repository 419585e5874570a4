use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build the HTTP client. Failure here is fatal for the caller.
    pub fn try_new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &LLMConfig) -> Result<Self> {
        Self::try_new(Duration::from_secs(config.timeout_secs))
    }

    fn normalize_model(model: &str) -> &str {
        let trimmed = model.trim();
        trimmed.strip_prefix("models/").unwrap_or(trimmed)
    }

    fn api_key(config: &LLMConfig) -> Result<&str> {
        config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::LLMError("Missing API key for Gemini".to_string()))
    }

    fn endpoint(config: &LLMConfig) -> String {
        let base_url = config.base_url.trim_end_matches('/');
        format!(
            "{}/{}:generateContent",
            base_url,
            Self::normalize_model(&config.model)
        )
    }

    fn extract_text(response: GeminiResponse) -> Result<String> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(AppError::LLMError(format!("Prompt blocked: {}", reason)));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMError("Response has no candidates".to_string()))?;

        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(AppError::LLMError(format!(
                "Response has no text (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate_json(
        &self,
        config: &LLMConfig,
        system: &str,
        user: &str,
        response_schema: &Value,
    ) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = Self::endpoint(config);

        let body = GeminiRequest {
            system_instruction: (!system.trim().is_empty()).then(|| GeminiContent {
                role: None,
                parts: vec![GeminiPart { text: system }],
            }),
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart { text: user }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema,
                temperature: config.temperature,
                max_output_tokens: config.max_tokens,
            },
        };

        debug!(model = %config.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!("API error ({}): {}", status, text)));
        }

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e.without_url())))?;

        Self::extract_text(json)
    }
}
