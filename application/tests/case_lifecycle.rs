//! End-to-end case lifecycle against a fake backend.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tribunal_application::{
    DeliberationParams, DeliberationUseCase, GatewayError, InvocationParams, LlmGateway,
    ResilientInvoker,
};
use tribunal_domain::{
    CaseState, CaseSubmission, Decision, Leaning, MAX_ROUNDS, Model, Phase, Side,
};

/// Answers every prompt with valid output for its phase.
///
/// The primary model is overloaded for the first call only, so the lifecycle
/// also exercises a retry.
struct FakeCourt {
    calls: AtomicU32,
}

#[async_trait]
impl LlmGateway for FakeCourt {
    async fn generate(&self, _model: &Model, prompt: &str) -> Result<String, GatewayError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(GatewayError::Overloaded("warming up".to_string()));
        }

        let reply = if prompt.contains("\"decision\"") {
            r#"```json
{
  "decision": "Side A",
  "summary": "Side A prevails on the breach claim.",
  "caseSummary": "A alleges breach of a supply contract; B denies it.",
  "sideAArguments": {"title": "Breach", "content": "Goods were delivered late."},
  "sideBArguments": {"title": "No breach", "content": "Delays were excused."},
  "reasoning": "The new evidence shows the delay was not excused.",
  "legalBasis": ["Contract terms on delivery"],
  "keyFindings": ["Delivery was late", "No force majeure notice was given"],
  "remedy": "Damages for the delay."
}
```"#
            .to_string()
        } else if prompt.contains("\"changesFromPrevious\"") {
            r#"{
  "summary": "The rebuttals strengthen Side A.",
  "reasoning": "Evidence X fixes the delivery date.",
  "leaningTowards": "Side A",
  "strengthsA": "Dated delivery records",
  "strengthsB": "Plausible excuse",
  "areasNeedingClarification": "Whether notice was given",
  "changesFromPrevious": "Moved from Neutral to Side A",
  "remainingConcerns": "Quantum of damages"
}"#
            .to_string()
        } else if prompt.contains("\"leaningTowards\"") {
            r#"{
  "summary": "Both sides present plausible accounts.",
  "reasoning": "The record is thin on delivery dates.",
  "leaningTowards": "Neutral",
  "strengthsA": ["Written contract"],
  "strengthsB": ["Consistent account"],
  "areasNeedingClarification": ["Actual delivery date"]
}"#
            .to_string()
        } else {
            "The court notes the new evidence and will weigh it.".to_string()
        };
        Ok(reply)
    }
}

fn use_case() -> DeliberationUseCase {
    let gateway: Arc<dyn LlmGateway> = Arc::new(FakeCourt {
        calls: AtomicU32::new(0),
    });
    let params = InvocationParams::new(vec![
        Model::Gemini25Pro,
        Model::Gemini25Flash,
    ])
    .without_backoff();
    DeliberationUseCase::new(
        Arc::new(ResilientInvoker::new(gateway, params)),
        DeliberationParams::default(),
    )
}

#[tokio::test]
async fn full_case_lifecycle() {
    let court = use_case();
    let mut case = CaseState::new();
    assert_eq!(case.phase(), Phase::AwaitingSubmissions);

    court
        .submit(&mut case, Side::A, CaseSubmission::new("A claims breach"))
        .await
        .unwrap();
    assert_eq!(case.phase(), Phase::AwaitingSubmissions);

    let outcome = court
        .submit(&mut case, Side::B, CaseSubmission::new("B denies breach"))
        .await
        .unwrap();
    assert_eq!(case.phase(), Phase::Deliberating);
    let interim = outcome.interim.unwrap();
    assert!(matches!(
        interim.leaning_towards,
        Leaning::SideA | Leaning::SideB | Leaning::Neutral
    ));
    assert_eq!(interim.strengths_a, "Written contract");

    for round in 1..=MAX_ROUNDS {
        let reply = court
            .post_argument(&mut case, Side::A, "New evidence X")
            .await
            .unwrap();
        assert_eq!(reply.remaining_rounds, MAX_ROUNDS - round);
    }
    let err = court
        .post_argument(&mut case, Side::A, "New evidence X")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "round_limit_exceeded");
    assert_eq!(case.argument_count(Side::A), MAX_ROUNDS);
    assert!(case.validate().is_ok());

    // Side B may still argue; its budget is separate.
    court
        .post_argument(&mut case, Side::B, "The delay was excused")
        .await
        .unwrap();

    let rethink = court.rethink(&mut case).await.unwrap();
    assert_eq!(case.phase(), Phase::Deliberating);
    assert_eq!(rethink.changes_from_previous, "Moved from Neutral to Side A");
    assert_eq!(
        case.interim_verdict().map(|v| v.leaning_towards),
        Some(Leaning::SideA)
    );

    let concluded = court.conclude(&mut case).await.unwrap();
    assert_eq!(case.phase(), Phase::Concluded);
    assert!(matches!(
        concluded.verdict.decision,
        Decision::SideA | Decision::SideB
    ));
    assert_eq!(concluded.metadata.argument_count_side_a, MAX_ROUNDS);
    assert_eq!(concluded.metadata.argument_count_side_b, 1);

    let err = court.conclude(&mut case).await.unwrap_err();
    assert_eq!(err.code(), "invalid_phase");
}
