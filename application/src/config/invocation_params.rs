//! Invocation parameters: fallback chain and retry budget.
//!
//! [`InvocationParams`] controls how
//! [`ResilientInvoker`](crate::use_cases::invoke::ResilientInvoker) walks the
//! model chain. These are application-layer concerns, not domain policy.

use std::time::Duration;
use tribunal_domain::Model;

/// Fallback chain and backoff budget.
///
/// Each model gets `max_retries_per_model + 1` attempts. The delay before
/// retry `k` (0-based) is `initial_delay * 2^k` plus a uniform jitter in
/// `[0, max_jitter]`.
#[derive(Debug, Clone)]
pub struct InvocationParams {
    /// Models in priority order, most capable first.
    pub models: Vec<Model>,
    /// Retries after the first attempt, per model.
    pub max_retries_per_model: u32,
    /// Base backoff delay.
    pub initial_delay: Duration,
    /// Upper bound of the random jitter added to each backoff.
    pub max_jitter: Duration,
}

impl Default for InvocationParams {
    fn default() -> Self {
        Self {
            models: Model::default_chain(),
            max_retries_per_model: 3,
            initial_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl InvocationParams {
    pub fn new(models: Vec<Model>) -> Self {
        Self {
            models,
            ..Default::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_max_retries_per_model(mut self, max: u32) -> Self {
        self.max_retries_per_model = max;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    /// Zero backoff, for tests and local fakes.
    pub fn without_backoff(self) -> Self {
        self.with_initial_delay(Duration::ZERO)
            .with_max_jitter(Duration::ZERO)
    }

    // ==================== Derived Values ====================

    pub fn attempts_per_model(&self) -> u32 {
        self.max_retries_per_model.saturating_add(1)
    }

    /// Delay before the retry following attempt `attempt` (0-based).
    pub fn backoff_delay(&self, attempt: u32, jitter: Duration) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor) + jitter.min(self.max_jitter)
    }
}
