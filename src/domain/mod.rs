pub mod audit_result;
pub mod audit_run;
pub mod audit_schema;
pub mod dataset;
pub mod error;
pub mod llm_config;
pub mod record;
pub mod report;
