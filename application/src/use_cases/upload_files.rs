//! Upload files use case.
//!
//! Sends a side's attachments to [`FileStorage`] and turns the results into
//! [`FileRef`]s for its submission. A file that cannot be stored is logged
//! and left out; it never fails the whole submission.

use crate::ports::file_storage::{FileStorage, StorageError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use tribunal_domain::{FileRef, Side};

/// A file waiting to be uploaded
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

pub struct UploadFilesUseCase {
    storage: Arc<dyn FileStorage>,
    max_file_size: u64,
}

impl UploadFilesUseCase {
    pub fn new(storage: Arc<dyn FileStorage>, max_file_size: u64) -> Self {
        Self {
            storage,
            max_file_size,
        }
    }

    /// Upload `files` in order, returning descriptors for those stored.
    pub async fn execute(&self, side: Side, files: Vec<PendingFile>) -> Vec<FileRef> {
        let mut stored = Vec::with_capacity(files.len());

        for file in files {
            if file.bytes.is_empty() {
                debug!(name = %file.name, "Skipping empty file");
                continue;
            }
            match self.upload(side, &file).await {
                Ok(file_ref) => stored.push(file_ref),
                Err(e) => warn!(side = %side, name = %file.name, "Upload failed: {}", e),
            }
        }

        stored
    }

    async fn upload(&self, side: Side, file: &PendingFile) -> Result<FileRef, StorageError> {
        let size = file.bytes.len() as u64;
        if size > self.max_file_size {
            return Err(StorageError::TooLarge {
                name: file.name.clone(),
                limit: self.max_file_size,
            });
        }

        let now = Utc::now();
        let suggested = storage_name(side, now.timestamp_millis(), &file.name);
        let result = self.storage.store(&file.bytes, &suggested).await?;

        Ok(FileRef {
            name: file.name.clone(),
            url: result.url,
            size: result.size,
            mime_type: result.mime_type,
            uploaded_at: now,
        })
    }
}

/// `case-{side}-{millis}-{name}`, with path separators removed from `name`.
pub fn storage_name(side: Side, millis: i64, name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    format!("case-{}-{}-{}", side.as_str(), millis, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::file_storage::StoredFile;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MemoryStorage {
        names: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl FileStorage for MemoryStorage {
        async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<StoredFile, StorageError> {
            if self
                .fail_on
                .as_deref()
                .is_some_and(|name| suggested_name.ends_with(name))
            {
                return Err(StorageError::Other("disk full".to_string()));
            }
            self.names.lock().unwrap().push(suggested_name.to_string());
            Ok(StoredFile {
                url: format!("mem://{}", suggested_name),
                size: bytes.len() as u64,
                mime_type: "application/octet-stream".to_string(),
            })
        }
    }

    fn storage(fail_on: Option<&str>) -> Arc<MemoryStorage> {
        Arc::new(MemoryStorage {
            names: Mutex::new(Vec::new()),
            fail_on: fail_on.map(str::to_string),
        })
    }

    #[test]
    fn test_storage_name() {
        assert_eq!(
            storage_name(Side::B, 1700000000000, "../../etc/contract.pdf"),
            "case-B-1700000000000-contract.pdf"
        );
    }

    #[tokio::test]
    async fn test_failed_and_empty_files_are_skipped() {
        let storage = storage(Some("broken.pdf"));
        let uc = UploadFilesUseCase::new(storage.clone(), 16);

        let refs = uc
            .execute(
                Side::A,
                vec![
                    PendingFile::new("contract.pdf", b"signed".to_vec()),
                    PendingFile::new("empty.txt", Vec::new()),
                    PendingFile::new("broken.pdf", b"x".to_vec()),
                    PendingFile::new("huge.bin", vec![0; 17]),
                    PendingFile::new("invoice.pdf", b"due".to_vec()),
                ],
            )
            .await;

        let names: Vec<_> = refs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["contract.pdf", "invoice.pdf"]);
        assert_eq!(refs[0].size, 6);
        assert!(refs[0].url.starts_with("mem://case-A-"));
        assert_eq!(storage.names.lock().unwrap().len(), 2);
    }
}
