//! LLM Gateway port
//!
//! Defines the interface to the text-generation backend: given a model id
//! and a prompt, eventually return text or fail with a classified error.

use async_trait::async_trait;
use thiserror::Error;
use tribunal_domain::Model;

/// Errors that can occur during a single generation attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Rate limited (429): {0}")]
    RateLimited(String),

    #[error("Service overloaded (503): {0}")]
    Overloaded(String),

    #[error("Internal server error (500): {0}")]
    ServerError(String),

    #[error("Connection timed out")]
    Timeout,

    #[error("Connection reset: {0}")]
    ConnectionReset(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Model {0} returned an empty response")]
    EmptyResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Classify an HTTP-style status code from the backend.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => GatewayError::RateLimited(message),
            503 => GatewayError::Overloaded(message),
            500 => GatewayError::ServerError(message),
            _ => GatewayError::Rejected { status, message },
        }
    }

    /// Transient failures worth retrying on the same model.
    ///
    /// Everything else ends the current model's attempts at once.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited(_)
                | GatewayError::Overloaded(_)
                | GatewayError::ServerError(_)
                | GatewayError::Timeout
                | GatewayError::ConnectionReset(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::RateLimited(_) => Some(429),
            GatewayError::Overloaded(_) => Some(503),
            GatewayError::ServerError(_) => Some(500),
            GatewayError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Gateway for text generation
///
/// Implementations (adapters) live in the infrastructure layer and are
/// injected into the use cases; nothing here is process-global.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a completion for `prompt` with `model`.
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError>;
}
