//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod deliberate;
pub mod invoke;
pub mod upload_files;
