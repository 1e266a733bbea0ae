//! Application-level configuration.
//!
//! - [`InvocationParams`]: fallback chain and retry/backoff budget
//! - [`DeliberationParams`]: submission limits applied by the use case

pub mod deliberation_params;
pub mod invocation_params;

pub use deliberation_params::DeliberationParams;
pub use invocation_params::InvocationParams;
