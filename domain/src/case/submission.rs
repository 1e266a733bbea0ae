//! Case submissions and file descriptors

use super::side::Side;
use crate::core::error::DeliberationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default per-file upload limit (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Descriptor of a file held by external storage.
///
/// The adjudicator never reads file content; only the name and count are
/// ever shown to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub name: String,
    pub url: String,
    pub size: u64,
    #[serde(alias = "type")]
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// One side's written case (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSubmission {
    pub primary_argument: String,
    #[serde(default)]
    pub detailed_evidence: String,
    #[serde(default)]
    pub response_to_other_side: String,
    #[serde(default)]
    pub files: Vec<FileRef>,
    pub submitted_at: DateTime<Utc>,
}

impl CaseSubmission {
    pub fn new(primary_argument: impl Into<String>) -> Self {
        Self {
            primary_argument: primary_argument.into(),
            detailed_evidence: String::new(),
            response_to_other_side: String::new(),
            files: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.detailed_evidence = evidence.into();
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response_to_other_side = response.into();
        self
    }

    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.files = files;
        self
    }

    /// Check required fields and file limits.
    pub fn validate(&self, side: Side, max_file_size: u64) -> Result<(), DeliberationError> {
        if self.primary_argument.trim().is_empty() {
            return Err(DeliberationError::validation(format!(
                "{}: primaryArgument is required",
                side
            )));
        }
        if let Some(file) = self.files.iter().find(|f| f.size > max_file_size) {
            return Err(DeliberationError::validation(format!(
                "File {} exceeds {} byte limit",
                file.name, max_file_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> FileRef {
        FileRef {
            name: name.to_string(),
            url: format!("file:///tmp/{}", name),
            size,
            mime_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_blank_primary_argument_rejected() {
        let submission = CaseSubmission::new("   ");
        let err = submission
            .validate(Side::A, DEFAULT_MAX_FILE_SIZE)
            .unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn test_oversized_file_rejected() {
        let submission = CaseSubmission::new("claim")
            .with_files(vec![file("contract.pdf", DEFAULT_MAX_FILE_SIZE + 1)]);
        let err = submission
            .validate(Side::B, DEFAULT_MAX_FILE_SIZE)
            .unwrap_err();
        assert!(err.to_string().contains("contract.pdf"));
    }

    #[test]
    fn test_valid_submission() {
        let submission = CaseSubmission::new("claim")
            .with_evidence("invoice")
            .with_files(vec![file("invoice.pdf", 1024)]);
        assert!(submission.validate(Side::A, DEFAULT_MAX_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_optional_fields_default_on_deserialize() {
        let json = r#"{"primaryArgument":"claim","submittedAt":"2025-01-01T00:00:00Z"}"#;
        let submission: CaseSubmission = serde_json::from_str(json).unwrap();
        assert!(submission.detailed_evidence.is_empty());
        assert!(submission.files.is_empty());
    }
}
