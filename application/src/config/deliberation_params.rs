//! Deliberation parameters: limits the use case checks before any
//! backend call.

use tribunal_domain::DEFAULT_MAX_FILE_SIZE;

#[derive(Debug, Clone)]
pub struct DeliberationParams {
    /// Per-file size limit for submission attachments, in bytes.
    pub max_file_size: u64,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DeliberationParams {
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}
