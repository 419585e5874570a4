use serde::{Deserialize, Serialize};
use std::fmt;

pub const FALLBACK_ACTION: &str = "Manual review required.";

/// Classification reported for a record.
///
/// Values the model returns outside the known set are kept verbatim in
/// `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataIssueType {
    MissingValue,
    LogicalError,
    FormatError,
    Clean,
    /// Produced locally when the audit call fails. Never offered to the model.
    SystemError,
    Other(String),
}

impl DataIssueType {
    /// Issue types the model is allowed to choose from.
    pub const ADVERTISED: [DataIssueType; 4] = [
        DataIssueType::MissingValue,
        DataIssueType::LogicalError,
        DataIssueType::FormatError,
        DataIssueType::Clean,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DataIssueType::MissingValue => "MissingValue",
            DataIssueType::LogicalError => "LogicalError",
            DataIssueType::FormatError => "FormatError",
            DataIssueType::Clean => "Clean",
            DataIssueType::SystemError => "SystemError",
            DataIssueType::Other(value) => value,
        }
    }
}

impl From<String> for DataIssueType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "MissingValue" => DataIssueType::MissingValue,
            "LogicalError" => DataIssueType::LogicalError,
            "FormatError" => DataIssueType::FormatError,
            "Clean" => DataIssueType::Clean,
            "SystemError" => DataIssueType::SystemError,
            _ => DataIssueType::Other(value),
        }
    }
}

impl From<DataIssueType> for String {
    fn from(value: DataIssueType) -> Self {
        match value {
            DataIssueType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DataIssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlagSeverity {
    High,
    Medium,
    Low,
    Other(String),
}

impl FlagSeverity {
    pub const ADVERTISED: [FlagSeverity; 3] =
        [FlagSeverity::High, FlagSeverity::Medium, FlagSeverity::Low];

    pub fn as_str(&self) -> &str {
        match self {
            FlagSeverity::High => "HIGH",
            FlagSeverity::Medium => "MEDIUM",
            FlagSeverity::Low => "LOW",
            FlagSeverity::Other(value) => value,
        }
    }
}

impl From<String> for FlagSeverity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "HIGH" => FlagSeverity::High,
            "MEDIUM" => FlagSeverity::Medium,
            "LOW" => FlagSeverity::Low,
            _ => FlagSeverity::Other(value),
        }
    }
}

impl From<FlagSeverity> for String {
    fn from(value: FlagSeverity) -> Self {
        match value {
            FlagSeverity::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FlagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of auditing one record.
///
/// Every field is optional because the model's reply is trusted as-is: a
/// reply that omits a field is kept, and the gap shows up in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    #[serde(default)]
    pub record_id: Option<i64>,
    #[serde(default)]
    pub data_issue_type: Option<DataIssueType>,
    #[serde(default)]
    pub flag_severity: Option<FlagSeverity>,
    #[serde(default)]
    pub recommended_action: Option<String>,
}

impl AuditResult {
    pub fn new(
        record_id: i64,
        data_issue_type: DataIssueType,
        flag_severity: FlagSeverity,
        recommended_action: impl Into<String>,
    ) -> Self {
        Self {
            record_id: Some(record_id),
            data_issue_type: Some(data_issue_type),
            flag_severity: Some(flag_severity),
            recommended_action: Some(recommended_action.into()),
        }
    }

    /// Result synthesized when the model could not be reached or understood.
    pub fn fallback(record_id: Option<i64>) -> Self {
        Self {
            record_id,
            data_issue_type: Some(DataIssueType::SystemError),
            flag_severity: Some(FlagSeverity::High),
            recommended_action: Some(FALLBACK_ACTION.to_string()),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.data_issue_type == Some(DataIssueType::Clean)
    }

    pub fn is_high_severity(&self) -> bool {
        self.flag_severity == Some(FlagSeverity::High)
    }

    pub fn is_system_error(&self) -> bool {
        self.data_issue_type == Some(DataIssueType::SystemError)
    }
}
