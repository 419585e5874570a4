pub mod audit_pipeline;
pub mod audit_prompts;
pub mod record_auditor;

#[cfg(test)]
pub(crate) mod stub_clients;
