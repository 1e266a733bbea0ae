//! Infrastructure layer for ai-tribunal
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileInvocationConfig,
    FileLoggingConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{GeminiConfig, GeminiGateway};
pub use storage::{CaseStoreError, JsonCaseStore, LocalFileStorage};
