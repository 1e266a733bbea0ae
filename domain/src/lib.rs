//! Domain layer for ai-tribunal
//!
//! This crate contains the case model, the deliberation state machine,
//! verdict entities, and the prompt builders. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Case lifecycle
//!
//! A case starts in `AWAITING_SUBMISSIONS`. Once both sides have submitted it
//! moves to `DELIBERATING`, where each side may post up to [`MAX_ROUNDS`]
//! rebuttals and the interim verdict may be reconsidered any number of
//! times. `conclude` issues the final verdict and the case is `CONCLUDED`.
//!
//! ## Verdicts
//!
//! Verdicts are produced by a text-generation backend and parsed out of its
//! reply. When the reply cannot be parsed, a neutral fallback verdict tagged
//! with [`VerdictOrigin::Fallback`] is used instead.

pub mod case;
pub mod core;
pub mod prompt;
pub mod verdict;

// Re-export commonly used types
pub use case::{
    side::Side,
    state::{ArgumentCount, CaseState, MAX_ROUNDS, Phase},
    submission::{CaseSubmission, DEFAULT_MAX_FILE_SIZE, FileRef},
    turn::{DeliberationTurn, TurnRole},
};
pub use self::core::{error::DeliberationError, model::Model};
pub use prompt::{NOT_PROVIDED, VerdictPrompt};
pub use verdict::{
    entities::{
        ArgumentSummary, Decision, FinalVerdict, InterimVerdict, Leaning, RethinkVerdict,
        Verdict, VerdictMetadata, VerdictOrigin,
    },
    parsing::{MalformedResponse, decode_final, decode_verdict, parse_structured},
};
