//! Case subdomain: the two sides, their submissions, the rebuttal
//! transcript, and the [`state::CaseState`] aggregate that enforces phase
//! and round rules.

pub mod side;
pub mod state;
pub mod submission;
pub mod turn;
