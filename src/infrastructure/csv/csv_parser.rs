// ============================================================
// CSV PARSER
// ============================================================
// Load a customer table from a delimited file

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use serde_json::{Number, Value};

use crate::domain::dataset::Dataset;
use crate::domain::error::{AppError, Result};

/// CSV parser producing typed datasets
pub struct CsvParser {
    /// Delimiter character, detected from content when unset
    delimiter: Option<u8>,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: None }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed delimiter instead of detecting one
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Parse a CSV file into a dataset
    pub fn parse_file(&self, path: &Path) -> Result<Dataset> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse_content(&Self::decode(&bytes))
    }

    /// Parse CSV content from string. The first line is the header row.
    pub fn parse_content(&self, content: &str) -> Result<Dataset> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::ParseError("CSV has no header row".to_string()));
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(&headers, &record));
        }

        let columns = headers.iter().map(str::to_string).collect();
        Ok(Dataset::new(columns, rows))
    }

    /// UTF-8 first, then Windows-1252 for legacy exports
    fn decode(bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

        match std::str::from_utf8(bytes) {
            Ok(content) => content.to_string(),
            Err(_) => {
                let (content, _, _) = WINDOWS_1252.decode(bytes);
                content.into_owned()
            }
        }
    }

    fn parse_row(headers: &StringRecord, record: &StringRecord) -> Vec<Value> {
        (0..headers.len())
            .map(|idx| Self::coerce_value(record.get(idx).unwrap_or("")))
            .collect()
    }

    /// Integer, then float, then boolean, else the raw text
    fn coerce_value(raw: &str) -> Value {
        if let Ok(int) = raw.parse::<i64>() {
            return Value::from(int);
        }

        if let Some(number) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(number);
        }

        match raw.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}
