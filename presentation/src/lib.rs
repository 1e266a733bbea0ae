//! Presentation layer for ai-tribunal
//!
//! This crate contains the JSON request/response surface, CLI definitions,
//! output formatters, and progress reporters.

pub mod api;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use api::{ApiResponse, CourtApi, TRANSPORT_FAILURE_MESSAGE};
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
