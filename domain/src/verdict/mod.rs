//! Verdict subdomain.
//!
//! - [`entities`]: interim, rethink and final verdict shapes
//! - [`parsing`]: fence-tolerant JSON extraction from backend text
//! - [`fallback`]: neutral, flagged substitutes used when parsing fails

pub mod entities;
pub mod fallback;
pub mod parsing;
