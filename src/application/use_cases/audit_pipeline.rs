use tracing::{info, info_span, Instrument};

use super::record_auditor::RecordAuditor;
use crate::domain::audit_run::AuditRun;
use crate::domain::audit_schema::audit_schema;
use crate::domain::dataset::Dataset;
use crate::interfaces::console::Console;

/// Audits a dataset one record at a time and prints the tally.
pub struct AuditPipeline {
    auditor: RecordAuditor,
    console: Console,
}

impl AuditPipeline {
    pub fn new(auditor: RecordAuditor, console: Console) -> Self {
        Self { auditor, console }
    }

    pub async fn run(&self, dataset: &Dataset) -> AuditRun {
        let mut run = AuditRun::start(dataset.len());
        let span = info_span!("audit_run", run_id = %run.run_id);

        async {
            let schema = audit_schema();
            self.console.records_loaded(dataset.len());
            info!(records = dataset.len(), "Audit run started");

            for record in dataset.records() {
                self.console.auditing(&record.id_label());

                let result = self.auditor.audit(&record, schema).await;
                self.console.outcome(&result);
                run.push(result);
            }

            run.finish();
            let report = run.report();
            info!(
                total = report.total_count,
                clean = report.clean_count,
                high = report.high_count,
                elapsed_ms = run.elapsed_ms().unwrap_or_default(),
                "Audit run finished"
            );
            self.console.report(&report);
        }
        .instrument(span)
        .await;

        run
    }
}
