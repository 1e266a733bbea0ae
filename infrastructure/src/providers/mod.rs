//! Text-generation backend adapters.

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiGateway};
