//! Structured-output contract for a single audit result.
//!
//! Written in the Gemini `responseSchema` dialect (upper-case type names). The
//! schema only shapes the model's reply; replies are not re-validated
//! against it.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

use super::audit_result::{DataIssueType, FlagSeverity};

pub const REQUIRED_FIELDS: [&str; 4] = [
    "record_id",
    "data_issue_type",
    "flag_severity",
    "recommended_action",
];

static AUDIT_SCHEMA: Lazy<AuditSchema> = Lazy::new(AuditSchema::build);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AuditSchema(Value);

impl AuditSchema {
    fn build() -> Self {
        let issue_types: Vec<String> = DataIssueType::ADVERTISED.into_iter().map(String::from).collect();
        let severities: Vec<String> = FlagSeverity::ADVERTISED.into_iter().map(String::from).collect();

        Self(json!({
            "type": "OBJECT",
            "properties": {
                "record_id": { "type": "INTEGER" },
                "data_issue_type": {
                    "type": "STRING",
                    "enum": issue_types,
                    "description": "The main type of data issue."
                },
                "flag_severity": {
                    "type": "STRING",
                    "enum": severities,
                    "description": "Severity of the issue."
                },
                "recommended_action": {
                    "type": "STRING",
                    "description": "Action to fix the data (e.g., 'Impute value with mean', 'Reject record')."
                }
            },
            "required": REQUIRED_FIELDS,
            "propertyOrdering": REQUIRED_FIELDS
        }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// The shared audit schema.
pub fn audit_schema() -> &'static AuditSchema {
    &AUDIT_SCHEMA
}
