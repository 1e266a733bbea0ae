//! Configuration file loading for ai-tribunal
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRIBUNAL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./tribunal.toml`
//! 4. Global: `$XDG_CONFIG_HOME/ai-tribunal/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileConfig, FileInvocationConfig,
    FileLoggingConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
