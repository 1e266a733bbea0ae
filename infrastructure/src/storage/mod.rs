//! Storage adapters: uploaded evidence and persisted cases.

mod case_store;
mod local;

pub use case_store::{CaseStoreError, JsonCaseStore};
pub use local::LocalFileStorage;
