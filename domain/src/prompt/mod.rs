//! Prompt domain
//!
//! Request builders for each deliberation phase. Each builder is a pure
//! function of the case, so identical state always yields the identical
//! prompt.

mod template;

pub use template::{NOT_PROVIDED, VerdictPrompt};
