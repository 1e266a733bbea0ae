//! Filesystem implementation of the [`FileStorage`] port.

use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::path::{Path, PathBuf};
use tracing::debug;
use tribunal_application::ports::file_storage::{FileStorage, StorageError, StoredFile};

const SUFFIX_LEN: usize = 6;

/// Stores files under a single directory, returning `file://` URLs.
pub struct LocalFileStorage {
    root: PathBuf,
    max_file_size: u64,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `suggested` with a random suffix inserted before the extension.
    fn unique_name(suggested: &str) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();
        match suggested.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => format!("{}-{}.{}", stem, suffix, ext),
            _ => format!("{}-{}", suggested, suffix),
        }
    }
}

/// Mime type from the file extension.
pub fn mime_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<StoredFile, StorageError> {
        let size = bytes.len() as u64;
        if size > self.max_file_size {
            return Err(StorageError::TooLarge {
                name: suggested_name.to_string(),
                limit: self.max_file_size,
            });
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(Self::unique_name(suggested_name));
        tokio::fs::write(&path, bytes).await?;

        let absolute = std::path::absolute(&path)?;
        debug!(path = %absolute.display(), size, "Stored file");

        Ok(StoredFile {
            url: format!("file://{}", absolute.display()),
            size,
            mime_type: mime_type_for(suggested_name).to_string(),
        })
    }
}
