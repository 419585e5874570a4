use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::application::{AuditPipeline, RecordAuditor};
use crate::domain::audit_run::AuditRun;
use crate::domain::dataset::Dataset;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::config::{ConfigService, API_KEY_VAR};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::llm_clients::{GeminiClient, LLMClient};
use crate::interfaces::console::Console;

pub type SharedLLMClient = Arc<dyn LLMClient + Send + Sync>;

/// How a pipeline invocation ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(AuditRun),
    /// Startup failed before any record was audited.
    Aborted(AppError),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Run the auditor against the real environment and Gemini.
pub async fn run() -> RunOutcome {
    let config_service = ConfigService::new();
    let api_key = std::env::var(API_KEY_VAR).ok();

    run_with(&config_service, api_key, Console::stdout(), |config| {
        let client: SharedLLMClient = Arc::new(GeminiClient::from_config(config)?);
        Ok(client)
    })
    .await
}

/// Startup sequence with its inputs made explicit.
///
/// `make_client` is only called once configuration and credential are in
/// place, so a missing key never leads to a network call.
pub async fn run_with<F>(
    config_service: &ConfigService,
    api_key: Option<String>,
    console: Console,
    make_client: F,
) -> RunOutcome
where
    F: FnOnce(&LLMConfig) -> Result<SharedLLMClient>,
{
    let config = match config_service
        .settings()
        .and_then(|settings| config_service.load(settings, api_key))
    {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Startup configuration failed");
            console.fatal(&err);
            return RunOutcome::Aborted(err);
        }
    };

    let llm_client = match make_client(&config.llm) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Failed to initialize Gemini client");
            console.client_init_error(&err);
            return RunOutcome::Aborted(err);
        }
    };

    console.banner();

    let dataset = match load_dataset(config.dataset.as_deref()) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!(error = %err, "Failed to load dataset");
            console.fatal(&err);
            return RunOutcome::Aborted(err);
        }
    };

    info!(model = %config.llm.model, records = dataset.len(), "Auditor ready");

    let auditor = RecordAuditor::new(llm_client, config.llm, console.clone());
    let pipeline = AuditPipeline::new(auditor, console);

    RunOutcome::Completed(pipeline.run(&dataset).await)
}

/// Configured CSV file, or the built-in sample table.
pub fn load_dataset(path: Option<&Path>) -> Result<Dataset> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading dataset from CSV");
            CsvParser::new().parse_file(path)
        }
        None => Ok(Dataset::sample_customers()),
    }
}
