use std::path::PathBuf;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{
    LLMConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_TIMEOUT_SECS,
};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const ENV_PREFIX: &str = "DATA_AUDITOR_";

/// Tunables read from `DATA_AUDITOR_*` variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuditorSettings {
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(url)]
    pub base_url: String,
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 1))]
    pub max_tokens: Option<u32>,
    pub dataset: Option<PathBuf>,
    #[validate(length(min = 1))]
    pub log_level: String,
}

impl Default for AuditorSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: None,
            max_tokens: None,
            dataset: None,
            log_level: "info".to_string(),
        }
    }
}

/// Everything the pipeline needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    pub llm: LLMConfig,
    pub dataset: Option<PathBuf>,
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::from_figment(
            Figment::from(Serialized::defaults(AuditorSettings::default()))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn settings(&self) -> Result<AuditorSettings> {
        let settings: AuditorSettings = self.figment.extract()?;
        settings
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(settings)
    }

    /// Combine validated settings with the API credential.
    pub fn load(&self, settings: AuditorSettings, api_key: Option<String>) -> Result<AuditorConfig> {
        let api_key = resolve_api_key(api_key)?;

        let llm = LLMConfig {
            base_url: settings.base_url,
            model: settings.model,
            api_key: Some(api_key),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout_secs: settings.timeout_secs,
        };

        Ok(AuditorConfig {
            llm,
            dataset: settings.dataset,
        })
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank keys count as missing.
pub fn resolve_api_key(value: Option<String>) -> Result<String> {
    value
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::MissingCredential(API_KEY_VAR.to_string()))
}
