use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::audit_prompts::{build_user_prompt, AUDIT_SYSTEM_INSTRUCTION};
use crate::domain::audit_result::AuditResult;
use crate::domain::audit_schema::AuditSchema;
use crate::domain::error::AppError;
use crate::domain::llm_config::LLMConfig;
use crate::domain::record::Record;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;
use crate::interfaces::console::Console;

/// Why a single audit fell back to the local result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFailure {
    /// The record could not be turned into a prompt.
    Serialization(String),
    /// The request never got a response.
    Network(String),
    /// The service answered with an error or without usable text.
    Service(String),
    /// The reply text is not JSON.
    MalformedResponse(String),
    /// The reply is JSON but not an audit object.
    SchemaViolation(String),
}

impl AuditFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            AuditFailure::Serialization(_) => "serialization",
            AuditFailure::Network(_) => "network",
            AuditFailure::Service(_) => "service",
            AuditFailure::MalformedResponse(_) => "malformed_response",
            AuditFailure::SchemaViolation(_) => "schema_violation",
        }
    }
}

impl fmt::Display for AuditFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditFailure::Serialization(msg) => write!(f, "could not serialize record: {}", msg),
            AuditFailure::Network(msg) => write!(f, "{}", msg),
            AuditFailure::Service(msg) => write!(f, "{}", msg),
            AuditFailure::MalformedResponse(msg) => write!(f, "reply is not valid JSON: {}", msg),
            AuditFailure::SchemaViolation(msg) => {
                write!(f, "reply does not match the audit schema: {}", msg)
            }
        }
    }
}

impl From<AppError> for AuditFailure {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Network(_) => AuditFailure::Network(err.to_string()),
            AppError::ParseError(_) => AuditFailure::MalformedResponse(err.to_string()),
            other => AuditFailure::Service(other.to_string()),
        }
    }
}

/// Parse the model's reply into an audit result.
///
/// Field values are taken as given; only the overall shape is checked.
pub fn parse_audit_reply(raw: &str) -> Result<AuditResult, AuditFailure> {
    let cleaned = clean_llm_response(raw);

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| AuditFailure::MalformedResponse(e.to_string()))?;

    if !value.is_object() {
        return Err(AuditFailure::SchemaViolation(
            "expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| AuditFailure::SchemaViolation(e.to_string()))
}

pub struct RecordAuditor {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
    console: Console,
}

impl RecordAuditor {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        config: LLMConfig,
        console: Console,
    ) -> Self {
        Self {
            llm_client,
            config,
            console,
        }
    }

    /// One model call for one record, with every failure kept distinct.
    pub async fn try_audit(
        &self,
        record: &Record,
        schema: &AuditSchema,
    ) -> Result<AuditResult, AuditFailure> {
        let record_json = record
            .to_json()
            .map_err(|e| AuditFailure::Serialization(e.to_string()))?;
        let user_prompt = build_user_prompt(&record_json);

        let raw_reply = self
            .llm_client
            .generate_json(
                &self.config,
                AUDIT_SYSTEM_INSTRUCTION,
                &user_prompt,
                schema.as_value(),
            )
            .await?;

        parse_audit_reply(&raw_reply)
    }

    /// Audit a record. Never fails: any error becomes the SystemError result.
    pub async fn audit(&self, record: &Record, schema: &AuditSchema) -> AuditResult {
        match self.try_audit(record, schema).await {
            Ok(result) => {
                if result.record_id != record.id() {
                    debug!(
                        record_id = %record.id_label(),
                        reply_record_id = ?result.record_id,
                        "Model echoed a different record id"
                    );
                }
                result
            }
            Err(failure) => {
                let id_label = record.id_label();
                warn!(
                    record_id = %id_label,
                    kind = failure.kind(),
                    error = %failure,
                    "Audit failed, using fallback result"
                );
                self.console.audit_error(&id_label, &failure);
                AuditResult::fallback(record.id())
            }
        }
    }
}
