//! Progress notification port
//!
//! Reports what the resilient invoker is doing while a caller waits on it.

use std::time::Duration;
use tribunal_domain::Model;

/// Callback for progress updates during an invocation
///
/// Implementations live in the presentation layer.
pub trait InvocationProgress: Send + Sync {
    /// An attempt on `model` is starting (`attempt` is 1-based).
    fn on_attempt(&self, _model: &Model, _attempt: u32, _max_attempts: u32) {}

    /// A retryable failure occurred; the next attempt follows after `delay`.
    fn on_retry_scheduled(&self, _model: &Model, _delay: Duration, _error: &str) {}

    /// `model` is done failing; the invoker moves down the chain.
    fn on_model_exhausted(&self, _model: &Model, _error: &str) {}

    /// `model` returned text.
    fn on_success(&self, _model: &Model) {}
}

/// No-op progress notifier
pub struct NoProgress;

impl InvocationProgress for NoProgress {}
