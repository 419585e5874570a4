use serde::{Deserialize, Serialize};

use super::audit_result::AuditResult;

/// End-of-run tally over the collected audit results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub total_count: usize,
    pub clean_count: usize,
    pub high_count: usize,
}

impl AuditReport {
    pub fn from_results(results: &[AuditResult]) -> Self {
        results.iter().fold(Self::default(), |mut report, result| {
            report.total_count += 1;
            if result.is_clean() {
                report.clean_count += 1;
            }
            if result.is_high_severity() {
                report.high_count += 1;
            }
            report
        })
    }
}
