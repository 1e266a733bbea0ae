//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation models in the fallback chain
//! - [`error::DeliberationError`]: caller protocol and validation errors
//! - [`string`]: UTF-8 safe string helpers

pub mod error;
pub mod model;
pub mod string;
