use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::audit_result::AuditResult;
use super::report::AuditReport;

/// Results of one pass over a dataset, in input order.
#[derive(Debug, Clone)]
pub struct AuditRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub results: Vec<AuditResult>,
}

impl AuditRun {
    pub fn start(capacity: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, result: AuditResult) {
        self.results.push(result);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn report(&self) -> AuditReport {
        AuditReport::from_results(&self.results)
    }

    pub fn elapsed_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}
