use std::fmt::Display;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::domain::audit_result::AuditResult;
use crate::domain::report::AuditReport;

const RULE: &str = "----------------------------------------------------------------------";
const MISSING: &str = "<missing>";

/// Human-readable run output. Stdout in production, a buffer in tests.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(std::io::stdout()))
    }

    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(writer)),
        }
    }

    /// Console writing into a shared in-memory buffer.
    pub fn captured() -> (Self, CapturedOutput) {
        let buffer = CapturedOutput::default();
        (Self::from_writer(Box::new(buffer.clone())), buffer)
    }

    fn line(&self, text: impl Display) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Broken stdout is not worth aborting an audit over
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }

    pub fn fatal(&self, message: impl Display) {
        self.line(RULE);
        self.line(format_args!("FATAL ERROR: {}", message));
        self.line(RULE);
    }

    pub fn client_init_error(&self, message: impl Display) {
        self.line(format_args!("Error initializing Gemini client: {}", message));
    }

    pub fn banner(&self) {
        self.line("--- Starting Gemini Data Auditor Pipeline ---");
    }

    pub fn records_loaded(&self, count: usize) {
        self.line(format_args!("Total records loaded: {}", count));
    }

    pub fn auditing(&self, id_label: &str) {
        self.line(format_args!("\nAuditing ID: {}...", id_label));
    }

    pub fn audit_error(&self, id_label: &str, error: impl Display) {
        self.line(format_args!(
            "  [ERROR] AI analysis failed for ID {}: {}",
            id_label, error
        ));
    }

    pub fn outcome(&self, result: &AuditResult) {
        self.line(format_args!(
            "  -> Issue: {} ({}). Action: {}",
            result
                .data_issue_type
                .as_ref()
                .map_or(MISSING, |t| t.as_str()),
            result.flag_severity.as_ref().map_or(MISSING, |s| s.as_str()),
            result.recommended_action.as_deref().unwrap_or(MISSING),
        ));
    }

    pub fn report(&self, report: &AuditReport) {
        self.line("\n\n--- FINAL DATA AUDIT REPORT ---");
        self.line(format_args!("Total Records: {}", report.total_count));
        self.line(format_args!("Clean Records: {}", report.clean_count));
        self.line(format_args!("High Severity Flags: {}", report.high_count));
        self.line("-----------------------------------");
    }
}

/// Shared byte buffer handed out by [`Console::captured`].
#[derive(Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut bytes = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
