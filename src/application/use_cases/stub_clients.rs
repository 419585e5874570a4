//! Deterministic `LLMClient` stand-ins for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::audit_prompts::USER_PROMPT_PREFIX;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::LLMClient;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub response_schema: Value,
}

/// Replays queued replies in order and records every call.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn generate_json(
        &self,
        _config: &LLMConfig,
        system: &str,
        user: &str,
        response_schema: &Value,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
            response_schema: response_schema.clone(),
        });

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no scripted reply left".to_string())))
    }
}

/// Applies the three audit rules to the record embedded in the prompt and
/// echoes its id back, the way a conforming model should.
pub struct RuleFollowingClient;

impl RuleFollowingClient {
    fn is_blank(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn classify(record: &Value) -> Value {
        let (issue, severity, action) =
            if Self::is_blank(record.get("name")) || Self::is_blank(record.get("city")) {
                ("MissingValue", "HIGH", "Fill in the missing field.")
            } else if record["spend_usd"].as_f64().unwrap_or(0.0) > 1000.0
                && record["is_premium"] != Value::Bool(true)
            {
                ("LogicalError", "MEDIUM", "Verify spend or premium status.")
            } else {
                ("Clean", "LOW", "No action needed.")
            };

        json!({
            "record_id": record["id"],
            "data_issue_type": issue,
            "flag_severity": severity,
            "recommended_action": action
        })
    }
}

#[async_trait]
impl LLMClient for RuleFollowingClient {
    async fn generate_json(
        &self,
        _config: &LLMConfig,
        _system: &str,
        user: &str,
        _response_schema: &Value,
    ) -> Result<String> {
        let record_json = user
            .strip_prefix(USER_PROMPT_PREFIX)
            .ok_or_else(|| AppError::LLMError("unexpected prompt".to_string()))?;
        let record: Value = serde_json::from_str(record_json)
            .map_err(|e| AppError::ParseError(e.to_string()))?;

        Ok(Self::classify(&record).to_string())
    }
}
