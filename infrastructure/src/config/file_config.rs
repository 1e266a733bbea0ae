//! Raw TOML configuration data types
//!
//! These structs mirror the config file. Each section converts into the
//! runtime parameters of the layer that uses it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tribunal_application::{DeliberationParams, InvocationParams};
use tribunal_domain::{DEFAULT_MAX_FILE_SIZE, Model};

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("invocation.models cannot be empty")]
    EmptyModelChain,

    #[error("invocation.models[{0}]: model name cannot be empty")]
    EmptyModelName(usize),

    #[error("storage.max_file_size cannot be 0")]
    ZeroFileSizeLimit,

    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("backend.base_url cannot be empty")]
    EmptyBaseUrl,
}

/// `[backend]`: the text-generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl FileBackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// `[invocation]`: fallback chain and retry budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInvocationConfig {
    /// Model ids, most capable first
    pub models: Vec<String>,
    pub max_retries_per_model: u32,
    pub initial_delay_ms: u64,
    pub max_jitter_ms: u64,
}

impl Default for FileInvocationConfig {
    fn default() -> Self {
        Self {
            models: Model::default_chain()
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            max_retries_per_model: 3,
            initial_delay_ms: 1000,
            max_jitter_ms: 1000,
        }
    }
}

impl FileInvocationConfig {
    /// Parsed chain, with the head replaced by `preferred` when given.
    pub fn model_chain(&self, preferred: Option<&str>) -> Vec<Model> {
        let mut chain: Vec<Model> = self
            .models
            .iter()
            .map(|name| name.trim().parse().unwrap_or_default())
            .collect();

        if let Some(name) = preferred.map(str::trim).filter(|s| !s.is_empty()) {
            let model = name.parse().unwrap_or_default();
            match chain.first_mut() {
                Some(head) => *head = model,
                None => chain.push(model),
            }
        }
        chain
    }

    pub fn to_invocation_params(&self, preferred: Option<&str>) -> InvocationParams {
        InvocationParams::new(self.model_chain(preferred))
            .with_max_retries_per_model(self.max_retries_per_model)
            .with_initial_delay(Duration::from_millis(self.initial_delay_ms))
            .with_max_jitter(Duration::from_millis(self.max_jitter_ms))
    }
}

/// `[storage]`: where uploaded evidence is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub directory: PathBuf,
    /// Per-file limit in bytes
    pub max_file_size: u64,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FileStorageConfig {
    pub fn to_deliberation_params(&self) -> DeliberationParams {
        DeliberationParams::default().with_max_file_size(self.max_file_size)
    }
}

/// `[logging]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL adjudication transcript; disabled when unset
    pub conversation_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: FileBackendConfig,
    pub invocation: FileInvocationConfig,
    pub storage: FileStorageConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.invocation.models.is_empty() {
            errors.push(ConfigValidationError::EmptyModelChain);
        }
        errors.extend(
            self.invocation
                .models
                .iter()
                .enumerate()
                .filter(|(_, name)| name.trim().is_empty())
                .map(|(idx, _)| ConfigValidationError::EmptyModelName(idx)),
        );
        if self.storage.max_file_size == 0 {
            errors.push(ConfigValidationError::ZeroFileSizeLimit);
        }
        if self.backend.timeout_seconds == 0 {
            errors.push(ConfigValidationError::InvalidTimeout);
        }
        if self.backend.base_url.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyBaseUrl);
        }

        errors
    }
}
