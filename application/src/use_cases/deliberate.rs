//! Deliberate use case.
//!
//! Drives a case through its lifecycle:
//!
//! ```text
//! AWAITING_SUBMISSIONS ──submit(A), submit(B)──▶ DELIBERATING ──conclude──▶ CONCLUDED
//!                                                 │  ▲
//!                                   postArgument  │  │  rethink
//!                                   (≤ MAX_ROUNDS)└──┘  (any number of times)
//! ```
//!
//! Every operation validates the caller's case and checks its guards first, builds the phase's
//! prompt, runs it through the [`ResilientInvoker`], and only then commits
//! to the caller's [`CaseState`]. A rejected request or a transport failure
//! leaves the case exactly as it was.

use crate::config::DeliberationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::invoke::{Generation, InvocationError, ResilientInvoker};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use tribunal_domain::verdict::fallback;
use tribunal_domain::{
    CaseState, CaseSubmission, DeliberationError, FinalVerdict, InterimVerdict, MAX_ROUNDS,
    MalformedResponse, Phase, RethinkVerdict, Side, Verdict, VerdictMetadata, VerdictOrigin,
    VerdictPrompt, decode_final, decode_verdict,
};

/// Errors surfaced by [`DeliberationUseCase`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliberateError {
    /// The request is not legal in the case's current state.
    #[error(transparent)]
    Protocol(#[from] DeliberationError),

    /// The backend could not be reached through the whole fallback chain.
    #[error(transparent)]
    Transport(#[from] InvocationError),
}

impl DeliberateError {
    pub fn code(&self) -> &'static str {
        match self {
            DeliberateError::Protocol(e) => e.code(),
            DeliberateError::Transport(InvocationError::Cancelled) => "cancelled",
            DeliberateError::Transport(_) => "transport_failure",
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, DeliberateError::Transport(_))
    }
}

/// Result of [`DeliberationUseCase::submit`]
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// This submission completed the pair and deliberation began.
    pub deliberation_started: bool,
    /// Initial interim verdict, present when deliberation began.
    pub interim: Option<InterimVerdict>,
}

/// Result of [`DeliberationUseCase::post_argument`]
#[derive(Debug, Clone)]
pub struct ArgumentOutcome {
    pub reply: String,
    pub remaining_rounds: u32,
}

/// Result of [`DeliberationUseCase::conclude`]
#[derive(Debug, Clone)]
pub struct ConcludeOutcome {
    pub verdict: FinalVerdict,
    pub metadata: VerdictMetadata,
}

/// Use case for deliberating a case.
///
/// Holds no case state of its own; callers own and persist [`CaseState`]
/// and must not run two operations on the same case concurrently.
pub struct DeliberationUseCase {
    invoker: Arc<ResilientInvoker<dyn LlmGateway>>,
    params: DeliberationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for DeliberationUseCase {
    fn clone(&self) -> Self {
        Self {
            invoker: self.invoker.clone(),
            params: self.params.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl DeliberationUseCase {
    pub fn new(invoker: Arc<ResilientInvoker<dyn LlmGateway>>, params: DeliberationParams) -> Self {
        Self {
            invoker,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &DeliberationParams {
        &self.params
    }

    // ==================== Operations ====================

    /// Record `side`'s submission.
    ///
    /// The second submission moves the case to `DELIBERATING` and generates
    /// the initial interim verdict before anything is committed.
    pub async fn submit(
        &self,
        case: &mut CaseState,
        side: Side,
        submission: CaseSubmission,
    ) -> Result<SubmitOutcome, DeliberateError> {
        case.validate()?;
        case.ensure_can_submit(side)?;
        submission.validate(side, self.params.max_file_size)?;

        let mut next = case.clone();
        let started = next.record_submission(side, submission)?;
        info!(side = %side, started, "Submission recorded");

        let interim = if started {
            self.log_transition(Phase::AwaitingSubmissions, Phase::Deliberating);
            let verdict = self.interim_for(&next).await?;
            next.set_interim_verdict(verdict.clone())?;
            Some(verdict)
        } else {
            None
        };

        *case = next;
        Ok(SubmitOutcome {
            deliberation_started: started,
            interim,
        })
    }

    /// Generate (or regenerate) the interim verdict from the submissions.
    pub async fn generate_interim_verdict(
        &self,
        case: &mut CaseState,
    ) -> Result<InterimVerdict, DeliberateError> {
        case.validate()?;
        case.ensure_deliberating("generateInterimVerdict")?;

        let verdict = self.interim_for(case).await?;
        case.set_interim_verdict(verdict.clone())?;
        Ok(verdict)
    }

    /// Post one rebuttal round for `side` and return the judge's reply.
    pub async fn post_argument(
        &self,
        case: &mut CaseState,
        side: Side,
        argument: &str,
    ) -> Result<ArgumentOutcome, DeliberateError> {
        case.validate()?;
        case.ensure_can_argue(side)?;
        if argument.trim().is_empty() {
            return Err(DeliberationError::validation("argument text is required").into());
        }

        let prompt = VerdictPrompt::argument(case, side, argument);
        let generation = self.invoke("argument", &prompt).await?;
        let reply = generation.text.trim().to_string();

        case.record_round(side, argument, reply.clone())?;
        let remaining_rounds = case.remaining_rounds(side);
        info!(side = %side, remaining_rounds, "Argument round recorded");
        if remaining_rounds == 0 {
            case.record_notice(
                side,
                format!("{} has used all {} rebuttal rounds", side.label(), MAX_ROUNDS),
            )?;
        }

        Ok(ArgumentOutcome {
            reply,
            remaining_rounds,
        })
    }

    /// Reconsider the interim verdict in light of the full transcript.
    ///
    /// Phase and round counters are never touched.
    pub async fn rethink(&self, case: &mut CaseState) -> Result<RethinkVerdict, DeliberateError> {
        case.validate()?;
        case.ensure_deliberating("rethink")?;

        let prompt = VerdictPrompt::rethink(case);
        let generation = self.invoke("rethink", &prompt).await?;
        let verdict = self.resolve(
            "rethink",
            &generation,
            decode_verdict::<RethinkVerdict>,
            fallback::rethink_verdict,
        );

        case.apply_rethink(verdict.clone())?;
        Ok(verdict)
    }

    /// Issue the final verdict and close the case.
    pub async fn conclude(&self, case: &mut CaseState) -> Result<ConcludeOutcome, DeliberateError> {
        case.validate()?;
        case.ensure_can_conclude()?;

        let prompt = VerdictPrompt::final_verdict(case);
        let generation = self.invoke("final", &prompt).await?;
        let verdict = self.resolve("final", &generation, decode_final, fallback::final_verdict);

        let metadata = VerdictMetadata {
            generated_at: Utc::now(),
            argument_count_side_a: case.argument_count(Side::A),
            argument_count_side_b: case.argument_count(Side::B),
            total_documents: case.total_documents(),
        };

        case.conclude(verdict.clone())?;
        self.log_transition(Phase::Deliberating, Phase::Concluded);
        info!(decision = verdict.decision.as_str(), "Case concluded");

        Ok(ConcludeOutcome { verdict, metadata })
    }

    // ==================== Helpers ====================

    async fn interim_for(&self, case: &CaseState) -> Result<InterimVerdict, DeliberateError> {
        let prompt = VerdictPrompt::interim(case);
        let generation = self.invoke("interim", &prompt).await?;
        Ok(self.resolve(
            "interim",
            &generation,
            decode_verdict::<InterimVerdict>,
            fallback::interim_verdict,
        ))
    }

    async fn invoke(&self, kind: &str, prompt: &str) -> Result<Generation, DeliberateError> {
        self.conversation_logger.log(ConversationEvent::new(
            "adjudication_request",
            json!({
                "kind": kind,
                "prompt_bytes": prompt.len(),
                "prompt": prompt,
            }),
        ));

        let generation = self.invoker.invoke(prompt).await.inspect_err(|e| {
            warn!(kind, "Adjudication failed: {}", e);
        })?;

        self.conversation_logger.log(ConversationEvent::new(
            "adjudication_response",
            json!({
                "kind": kind,
                "model": generation.model.to_string(),
                "attempts": generation.attempts,
                "bytes": generation.text.len(),
                "text": generation.text,
            }),
        ));
        Ok(generation)
    }

    /// Decode a structured verdict, substituting the flagged fallback when
    /// the reply cannot be read.
    fn resolve<T, D, F>(&self, kind: &str, generation: &Generation, decode: D, fallback: F) -> T
    where
        T: Verdict + Serialize,
        D: FnOnce(&str) -> Result<T, MalformedResponse>,
        F: FnOnce(String) -> T,
    {
        match decode(&generation.text) {
            Ok(mut verdict) => {
                verdict.set_origin(VerdictOrigin::adjudicated(generation.model.clone()));
                verdict
            }
            Err(e) => {
                warn!(
                    kind,
                    model = %generation.model,
                    "Substituting fallback verdict: {}",
                    e
                );
                let verdict = fallback(e.to_string());
                self.conversation_logger.log(ConversationEvent::new(
                    "fallback_verdict",
                    json!({
                        "kind": kind,
                        "fallback": true,
                        "model": generation.model.to_string(),
                        "reason": e.reason,
                        "excerpt": e.excerpt,
                        "verdict": serde_json::to_value(&verdict).unwrap_or_default(),
                    }),
                ));
                verdict
            }
        }
    }

    fn log_transition(&self, from: Phase, to: Phase) {
        info!(from = %from, to = %to, "Phase transition");
        self.conversation_logger.log(ConversationEvent::new(
            "phase_transition",
            json!({ "from": from.as_str(), "to": to.as_str() }),
        ));
    }
}
