pub mod use_cases;

pub use use_cases::audit_pipeline::AuditPipeline;
pub use use_cases::record_auditor::{AuditFailure, RecordAuditor};
