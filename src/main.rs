use std::process::ExitCode;

use data_auditor::infrastructure::config::ConfigService;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // RUST_LOG wins over DATA_AUDITOR_LOG_LEVEL
    let level = ConfigService::new()
        .settings()
        .map(|settings| settings.log_level)
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    if data_auditor::run().await.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
