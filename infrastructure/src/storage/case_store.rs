//! JSON file persistence for [`CaseState`].
//!
//! The deliberation core never persists anything; this store is the
//! caller's system of record between CLI invocations.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tribunal_domain::CaseState;

#[derive(Error, Debug)]
pub enum CaseStoreError {
    #[error("Case file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Case file {path} is not a valid case: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Case file {path} is inconsistent: {reason}")]
    Inconsistent { path: PathBuf, reason: String },
}

pub struct JsonCaseStore {
    path: PathBuf,
}

impl JsonCaseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the case, or a fresh one when the file does not exist yet.
    pub fn load(&self) -> Result<CaseState, CaseStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CaseState::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let case: CaseState =
            serde_json::from_str(&content).map_err(|source| CaseStoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        case.validate()
            .map_err(|e| CaseStoreError::Inconsistent {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(case)
    }

    /// Write the case as pretty JSON, replacing the file atomically.
    pub fn save(&self, case: &CaseState) -> Result<(), CaseStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(case).map_err(|source| {
            CaseStoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> CaseStoreError {
        CaseStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_domain::{CaseSubmission, Phase, Side};

    #[test]
    fn test_missing_file_yields_fresh_case() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCaseStore::new(dir.path().join("case.json"));
        assert_eq!(store.load().unwrap(), CaseState::new());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCaseStore::new(dir.path().join("cases/dispute.json"));

        let mut case = CaseState::new();
        case.record_submission(Side::A, CaseSubmission::new("A claims breach"))
            .unwrap();
        case.record_submission(Side::B, CaseSubmission::new("B denies breach"))
            .unwrap();
        store.save(&case).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, case);
        assert_eq!(loaded.phase(), Phase::Deliberating);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonCaseStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CaseStoreError::Corrupt { .. }));
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        std::fs::write(
            &path,
            r#"{"phase":"DELIBERATING","argumentCount":{"A":2,"B":0}}"#,
        )
        .unwrap();

        let err = JsonCaseStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CaseStoreError::Inconsistent { .. }));
    }
}
