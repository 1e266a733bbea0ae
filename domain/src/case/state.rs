//! Case aggregate and deliberation state machine
//!
//! [`CaseState`] is a plain value owned by the caller: every operation
//! receives it, and the transition methods here enforce the lifecycle
//!
//! ```text
//! AWAITING_SUBMISSIONS ──(both sides submitted)──▶ DELIBERATING ──(conclude)──▶ CONCLUDED
//!                                                   │  ▲
//!                                                   └──┘ argue / rethink
//! ```
//!
//! Guards (`ensure_*`) never mutate. Commit methods re-check their guard
//! first, so a rejected call leaves the state exactly as it was.

use super::side::Side;
use super::submission::CaseSubmission;
use super::turn::DeliberationTurn;
use crate::core::error::DeliberationError;
use crate::verdict::entities::{FinalVerdict, InterimVerdict, RethinkVerdict};
use serde::{Deserialize, Serialize};

/// Maximum rebuttal rounds per side
pub const MAX_ROUNDS: u32 = 5;

/// Position of a case in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    AwaitingSubmissions,
    Deliberating,
    Concluded,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AwaitingSubmissions => "AWAITING_SUBMISSIONS",
            Phase::Deliberating => "DELIBERATING",
            Phase::Concluded => "CONCLUDED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::AwaitingSubmissions => "Awaiting Submissions",
            Phase::Deliberating => "Deliberating",
            Phase::Concluded => "Concluded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Concluded)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rebuttal rounds used per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentCount {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
}

impl ArgumentCount {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    fn increment(&mut self, side: Side) {
        match side {
            Side::A => self.a += 1,
            Side::B => self.b += 1,
        }
    }
}

/// Aggregate root of a single case (Entity)
///
/// Holds the latest verdict of each kind; verdicts are replaced wholesale,
/// never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseState {
    #[serde(default)]
    side_a: Option<CaseSubmission>,
    #[serde(default)]
    side_b: Option<CaseSubmission>,
    #[serde(default)]
    turns_a: Vec<DeliberationTurn>,
    #[serde(default)]
    turns_b: Vec<DeliberationTurn>,
    #[serde(default)]
    argument_count: ArgumentCount,
    #[serde(default)]
    interim_verdict: Option<InterimVerdict>,
    #[serde(default)]
    rethink_verdict: Option<RethinkVerdict>,
    #[serde(default)]
    final_verdict: Option<FinalVerdict>,
    #[serde(default)]
    phase: Phase,
}

impl CaseState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn submission(&self, side: Side) -> Option<&CaseSubmission> {
        match side {
            Side::A => self.side_a.as_ref(),
            Side::B => self.side_b.as_ref(),
        }
    }

    pub fn turns(&self, side: Side) -> &[DeliberationTurn] {
        match side {
            Side::A => &self.turns_a,
            Side::B => &self.turns_b,
        }
    }

    pub fn argument_count(&self, side: Side) -> u32 {
        self.argument_count.get(side)
    }

    pub fn remaining_rounds(&self, side: Side) -> u32 {
        MAX_ROUNDS.saturating_sub(self.argument_count(side))
    }

    pub fn interim_verdict(&self) -> Option<&InterimVerdict> {
        self.interim_verdict.as_ref()
    }

    pub fn rethink_verdict(&self) -> Option<&RethinkVerdict> {
        self.rethink_verdict.as_ref()
    }

    pub fn final_verdict(&self) -> Option<&FinalVerdict> {
        self.final_verdict.as_ref()
    }

    /// Rebuttal arguments posted by `side`, oldest first.
    pub fn user_arguments(&self, side: Side) -> impl Iterator<Item = &str> {
        self.turns(side)
            .iter()
            .filter(|t| t.is_user())
            .map(|t| t.content.as_str())
    }

    pub fn total_documents(&self) -> usize {
        Side::BOTH
            .iter()
            .filter_map(|s| self.submission(*s))
            .map(|s| s.files.len())
            .sum()
    }

    /// Check a case received from outside before operating on it.
    ///
    /// `argument_count[side]` must equal the side's user turns and stay
    /// within [`MAX_ROUNDS`]. Past `AWAITING_SUBMISSIONS` both submissions
    /// must be on record; before it no transcript may exist. A concluded
    /// case carries its final verdict.
    pub fn validate(&self) -> Result<(), DeliberationError> {
        for side in Side::BOTH {
            let count = self.argument_count(side);
            if count > MAX_ROUNDS {
                return Err(DeliberationError::validation(format!(
                    "argument count for {} exceeds {} rounds",
                    side, MAX_ROUNDS
                )));
            }
            let user_turns = self.user_arguments(side).count();
            if count as usize != user_turns {
                return Err(DeliberationError::validation(format!(
                    "argument count for {} is {} but {} arguments are on record",
                    side, count, user_turns
                )));
            }
        }

        match self.phase {
            Phase::AwaitingSubmissions => {
                if self.side_a.is_some() && self.side_b.is_some() {
                    return Err(DeliberationError::validation(
                        "both submissions are on record but deliberation has not started",
                    ));
                }
                if !self.turns_a.is_empty() || !self.turns_b.is_empty() {
                    return Err(DeliberationError::validation(
                        "transcript present before deliberation started",
                    ));
                }
            }
            Phase::Deliberating | Phase::Concluded => {
                if let Some(side) = Side::BOTH.into_iter().find(|s| self.submission(*s).is_none()) {
                    return Err(DeliberationError::validation(format!(
                        "case is {} but {} has no submission on record",
                        self.phase, side
                    )));
                }
            }
        }

        if self.phase == Phase::Concluded && self.final_verdict.is_none() {
            return Err(DeliberationError::validation(
                "case is CONCLUDED without a final verdict",
            ));
        }
        Ok(())
    }

    // ==================== Guards ====================

    fn ensure_phase(&self, operation: &'static str, expected: Phase) -> Result<(), DeliberationError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DeliberationError::invalid_phase(operation, self.phase))
        }
    }

    pub fn ensure_can_submit(&self, side: Side) -> Result<(), DeliberationError> {
        self.ensure_phase("submit", Phase::AwaitingSubmissions)?;
        if self.submission(side).is_some() {
            return Err(DeliberationError::DuplicateSubmission(side));
        }
        Ok(())
    }

    pub fn ensure_deliberating(&self, operation: &'static str) -> Result<(), DeliberationError> {
        self.ensure_phase(operation, Phase::Deliberating)
    }

    pub fn ensure_can_argue(&self, side: Side) -> Result<(), DeliberationError> {
        self.ensure_deliberating("postArgument")?;
        if self.argument_count(side) >= MAX_ROUNDS {
            return Err(DeliberationError::RoundLimitExceeded {
                side,
                max: MAX_ROUNDS,
            });
        }
        Ok(())
    }

    pub fn ensure_can_conclude(&self) -> Result<(), DeliberationError> {
        self.ensure_deliberating("conclude")?;
        if let Some(side) = Side::BOTH.into_iter().find(|s| self.submission(*s).is_none()) {
            return Err(DeliberationError::validation(format!(
                "{} has no submission on record",
                side
            )));
        }
        Ok(())
    }

    // ==================== Transitions ====================

    fn advance_to(&mut self, next: Phase) {
        debug_assert!(next >= self.phase, "phase never regresses");
        if next > self.phase {
            self.phase = next;
        }
    }

    /// Record a side's submission.
    ///
    /// Returns `true` when this completed the pair and the case moved to
    /// [`Phase::Deliberating`].
    pub fn record_submission(
        &mut self,
        side: Side,
        submission: CaseSubmission,
    ) -> Result<bool, DeliberationError> {
        self.ensure_can_submit(side)?;
        match side {
            Side::A => self.side_a = Some(submission),
            Side::B => self.side_b = Some(submission),
        }
        if self.side_a.is_some() && self.side_b.is_some() {
            self.advance_to(Phase::Deliberating);
            return Ok(true);
        }
        Ok(false)
    }

    /// Record one full round: the side's argument and the judge's reply.
    pub fn record_round(
        &mut self,
        side: Side,
        argument: impl Into<String>,
        judge_reply: impl Into<String>,
    ) -> Result<(), DeliberationError> {
        self.ensure_can_argue(side)?;
        let turns = match side {
            Side::A => &mut self.turns_a,
            Side::B => &mut self.turns_b,
        };
        turns.push(DeliberationTurn::user(side, argument));
        turns.push(DeliberationTurn::judge(side, judge_reply));
        self.argument_count.increment(side);
        Ok(())
    }

    /// Append a procedural notice. Does not count as a round.
    pub fn record_notice(
        &mut self,
        side: Side,
        content: impl Into<String>,
    ) -> Result<(), DeliberationError> {
        self.ensure_deliberating("notice")?;
        let turn = DeliberationTurn::system(side, content);
        match side {
            Side::A => self.turns_a.push(turn),
            Side::B => self.turns_b.push(turn),
        }
        Ok(())
    }

    pub fn set_interim_verdict(&mut self, verdict: InterimVerdict) -> Result<(), DeliberationError> {
        self.ensure_deliberating("generateInterimVerdict")?;
        self.interim_verdict = Some(verdict);
        Ok(())
    }

    /// Replace the interim verdict with a reconsidered one.
    ///
    /// Phase and round counters are untouched.
    pub fn apply_rethink(&mut self, verdict: RethinkVerdict) -> Result<(), DeliberationError> {
        self.ensure_deliberating("rethink")?;
        self.interim_verdict = Some(verdict.assessment.clone());
        self.rethink_verdict = Some(verdict);
        Ok(())
    }

    pub fn conclude(&mut self, verdict: FinalVerdict) -> Result<(), DeliberationError> {
        self.ensure_can_conclude()?;
        self.final_verdict = Some(verdict);
        self.advance_to(Phase::Concluded);
        Ok(())
    }
}
