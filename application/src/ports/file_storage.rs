//! File storage port
//!
//! The adjudicator never handles file bytes itself: uploads go to external
//! storage, and only the returned descriptor is recorded on the case.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File {name} exceeds {limit} byte limit")]
    TooLarge { name: String, limit: u64 },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Other(String),
}

/// Descriptor returned by storage for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
    pub size: u64,
    pub mime_type: String,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` under a name derived from `suggested_name`.
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<StoredFile, StorageError>;
}
