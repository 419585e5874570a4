use serde_json::{json, Value};

use super::record::Record;
use crate::domain::error::{AppError, Result};

/// Column-oriented table of customer rows held in memory for one run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from named columns. All columns must have the same length.
    pub fn from_columns(columns: Vec<(&str, Vec<Value>)>) -> Result<Self> {
        let height = columns.first().map(|(_, values)| values.len()).unwrap_or(0);

        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != height) {
            return Err(AppError::ParseError(format!(
                "Column '{}' has {} values, expected {}",
                name,
                values.len(),
                height
            )));
        }

        let names = columns.iter().map(|(name, _)| name.to_string()).collect();
        let mut rows = vec![Vec::with_capacity(columns.len()); height];
        for (_, values) in columns {
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }

        Ok(Self::new(names, rows))
    }

    /// The five-customer table audited when no dataset file is configured.
    pub fn sample_customers() -> Self {
        let columns = vec![
            ("id", vec![json!(101), json!(102), json!(103), json!(104), json!(105)]),
            (
                "name",
                vec![
                    json!("Alice Johnson"),
                    json!("Bob Smith"),
                    json!("Carlos Rivera"),
                    json!(""),
                    json!("Eve Adams"),
                ],
            ),
            (
                "city",
                vec![json!("NYC"), json!("Boston"), json!(""), json!("LA"), json!("Denver")],
            ),
            (
                "spend_usd",
                vec![json!(150), json!(1200), json!(50), json!(999), json!(15000)],
            ),
            (
                "is_premium",
                vec![json!(false), json!(false), json!(false), json!(true), json!(false)],
            ),
        ];

        Self::from_columns(columns).unwrap_or_default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as records, in table order. Short rows simply lack trailing fields.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows.iter().map(move |row| {
            let mut record = Record::new();
            for (column, value) in self.columns.iter().zip(row) {
                record.insert(column.clone(), value.clone());
            }
            record
        })
    }
}
