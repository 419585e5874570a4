use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::{AppError, Result};

/// One customer row submitted for audit.
///
/// Fields keep the order they were inserted in, so the JSON handed to the
/// model lists columns the same way the source table does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The `id` column, when present and integral.
    pub fn id(&self) -> Option<i64> {
        self.fields.get("id").and_then(Value::as_i64)
    }

    /// Label used in progress lines; falls back to the raw value or `Unknown`.
    pub fn id_label(&self) -> String {
        match self.fields.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => "Unknown".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.fields)
            .map_err(|e| AppError::ParseError(format!("Failed to serialize record: {}", e)))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bob() -> Record {
        Record::new()
            .with_field("id", 102)
            .with_field("name", "Bob Smith")
            .with_field("city", "Boston")
            .with_field("spend_usd", 1200)
            .with_field("is_premium", false)
    }

    #[test]
    fn test_to_json_keeps_column_order() {
        assert_eq!(
            bob().to_json().unwrap(),
            r#"{"id":102,"name":"Bob Smith","city":"Boston","spend_usd":1200,"is_premium":false}"#
        );
    }

    #[test]
    fn test_id_reads_integer_column() {
        assert_eq!(bob().id(), Some(102));
        assert_eq!(bob().id_label(), "102");
    }

    #[test]
    fn test_missing_id() {
        let record = Record::new().with_field("name", "Nobody");
        assert_eq!(record.id(), None);
        assert_eq!(record.id_label(), "Unknown");
    }

    #[test]
    fn test_non_integer_id_has_label_but_no_id() {
        let record = Record::new().with_field("id", json!("A-7"));
        assert_eq!(record.id(), None);
        assert_eq!(record.id_label(), "A-7");
    }
}
