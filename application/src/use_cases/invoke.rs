//! Resilient invocation
//!
//! Walks the model fallback chain, retrying each model with exponential
//! backoff and jitter, until some model returns text.
//!
//! ```text
//! for model in chain:                 (most capable first)
//!     for attempt in 0..=max_retries:
//!         generate ─▶ text            → done (later models never tried)
//!                  ─▶ retryable error → sleep initial_delay·2^attempt + jitter
//!                  ─▶ other error     → next model
//! all models failed → InvocationError::Exhausted
//! ```
//!
//! The invoker holds no per-request state and can be shared across
//! concurrent deliberations.

use crate::config::InvocationParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{InvocationProgress, NoProgress};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tribunal_domain::Model;

/// Terminal invocation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("No models configured for invocation")]
    NoModels,

    #[error(
        "Failed to generate content after trying {models} model(s) with {max_retries} retries each. Last error: {last_error}"
    )]
    Exhausted {
        models: usize,
        max_retries: u32,
        last_error: GatewayError,
    },

    #[error("Invocation cancelled")]
    Cancelled,
}

/// Successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Model that produced the text
    pub model: Model,
    pub text: String,
    /// Attempts spent on `model`, including the successful one
    pub attempts: u32,
}

/// Why a single model in the chain stopped
enum ModelOutcome {
    Failed(GatewayError),
    Cancelled,
}

/// Fallback-chain invoker over an injected [`LlmGateway`]
pub struct ResilientInvoker<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    params: InvocationParams,
    progress: Arc<dyn InvocationProgress>,
    cancellation: Option<CancellationToken>,
}

impl<G: LlmGateway + ?Sized> ResilientInvoker<G> {
    pub fn new(gateway: Arc<G>, params: InvocationParams) -> Self {
        Self {
            gateway,
            params,
            progress: Arc::new(NoProgress),
            cancellation: None,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn InvocationProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Abort between attempts and during backoff when `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn params(&self) -> &InvocationParams {
        &self.params
    }

    /// Run `prompt` through the fallback chain.
    pub async fn invoke(&self, prompt: &str) -> Result<Generation, InvocationError> {
        let models = &self.params.models;
        if models.is_empty() {
            return Err(InvocationError::NoModels);
        }

        let mut last_error = None;

        for (idx, model) in models.iter().enumerate() {
            info!(
                "[Model {}/{}] Attempting with: {}",
                idx + 1,
                models.len(),
                model
            );

            match self.invoke_model(model, prompt).await {
                Ok(generation) => {
                    info!(model = %model, attempts = generation.attempts, "Generation succeeded");
                    self.progress.on_success(model);
                    return Ok(generation);
                }
                Err(ModelOutcome::Cancelled) => {
                    info!(model = %model, "Invocation cancelled");
                    return Err(InvocationError::Cancelled);
                }
                Err(ModelOutcome::Failed(error)) => {
                    warn!(
                        model = %model,
                        status = ?error.status(),
                        "Failed with model: {}",
                        error
                    );
                    self.progress.on_model_exhausted(model, &error.to_string());
                    last_error = Some(error);
                }
            }
        }

        Err(InvocationError::Exhausted {
            models: models.len(),
            max_retries: self.params.max_retries_per_model,
            last_error: last_error
                .unwrap_or_else(|| GatewayError::Other("Unknown error".to_string())),
        })
    }

    /// All attempts for one model.
    async fn invoke_model(&self, model: &Model, prompt: &str) -> Result<Generation, ModelOutcome> {
        let max_attempts = self.params.attempts_per_model();

        for attempt in 0..max_attempts {
            if self.is_cancelled() {
                return Err(ModelOutcome::Cancelled);
            }
            self.progress.on_attempt(model, attempt + 1, max_attempts);

            let result = tokio::select! {
                biased;
                _ = self.cancelled() => return Err(ModelOutcome::Cancelled),
                result = self.gateway.generate(model, prompt) => result,
            };

            let error = match result {
                Ok(text) if !text.trim().is_empty() => {
                    return Ok(Generation {
                        model: model.clone(),
                        text,
                        attempts: attempt + 1,
                    });
                }
                Ok(_) => GatewayError::EmptyResponse(model.to_string()),
                Err(e) => e,
            };

            if !error.is_retryable() || attempt + 1 == max_attempts {
                debug!(model = %model, attempt = attempt + 1, "Giving up on model");
                return Err(ModelOutcome::Failed(error));
            }

            let delay = self.params.backoff_delay(attempt, self.jitter());
            warn!(
                "[Attempt {}/{}] Retrying after {}ms... Error: {}",
                attempt + 1,
                max_attempts,
                delay.as_millis(),
                error
            );
            self.progress
                .on_retry_scheduled(model, delay, &error.to_string());

            tokio::select! {
                biased;
                _ = self.cancelled() => return Err(ModelOutcome::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        // max_attempts is at least 1, so the loop always returns
        Err(ModelOutcome::Failed(GatewayError::Other(
            "No attempts made".to_string(),
        )))
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.params.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Resolves when cancelled; never resolves without a token.
    async fn cancelled(&self) {
        match &self.cancellation {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    }
}
