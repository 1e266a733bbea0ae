//! Fallback verdicts.
//!
//! Used when the backend answered but its structured output could not be
//! parsed, so the case can still progress. Every fallback is neutral, names
//! neither side as favoured, and carries [`VerdictOrigin::Fallback`] so it
//! can never be mistaken for an adjudication.

use crate::verdict::entities::{
    ArgumentSummary, Decision, FinalVerdict, InterimVerdict, Leaning, RethinkVerdict,
    VerdictOrigin,
};

const NOTICE: &str = "[Provisional - automated assessment unavailable]";

/// Neutral interim assessment
pub fn interim_verdict(reason: impl Into<String>) -> InterimVerdict {
    InterimVerdict {
        summary: format!(
            "{} Both sides present points that require further discussion; no side is favoured at this stage.",
            NOTICE
        ),
        reasoning: "The adjudicator's analysis could not be read. More detailed arguments will help clarify the issues.".to_string(),
        leaning_towards: Leaning::Neutral,
        strengths_a: "Not assessed".to_string(),
        strengths_b: "Not assessed".to_string(),
        areas_needing_clarification:
            "Both sides should provide more specific evidence and applicable precedents".to_string(),
        origin: VerdictOrigin::fallback(reason),
    }
}

/// Neutral reconsideration that reports no change
pub fn rethink_verdict(reason: impl Into<String>) -> RethinkVerdict {
    let mut assessment = interim_verdict(reason);
    assessment.summary = format!(
        "{} After reconsideration the case remains open with valid points on both sides.",
        NOTICE
    );
    RethinkVerdict {
        assessment,
        changes_from_previous: "No assessment change could be determined".to_string(),
        remaining_concerns: "The reconsidered analysis could not be read; request another rethink"
            .to_string(),
    }
}

/// Undecided final verdict
pub fn final_verdict(reason: impl Into<String>) -> FinalVerdict {
    FinalVerdict {
        decision: Decision::Undetermined,
        summary: format!(
            "{} No ruling could be produced for this case. Neither side prevails on this record.",
            NOTICE
        ),
        case_summary: "A dispute between Side A and Side B; see the submissions on record."
            .to_string(),
        side_a_arguments: ArgumentSummary {
            title: "Side A's Argument".to_string(),
            content: "Not assessed".to_string(),
        },
        side_b_arguments: ArgumentSummary {
            title: "Side B's Argument".to_string(),
            content: "Not assessed".to_string(),
        },
        reasoning: "The adjudicator's final analysis could not be read.".to_string(),
        legal_basis: Vec::new(),
        key_findings: Vec::new(),
        remedy: "None. The matter should be resubmitted for a ruling.".to_string(),
        origin: VerdictOrigin::fallback(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::entities::Verdict;

    #[test]
    fn test_fallbacks_are_neutral_and_flagged() {
        let interim = interim_verdict("bad json");
        assert_eq!(interim.leaning_towards, Leaning::Neutral);
        assert!(interim.is_fallback());

        let rethink = rethink_verdict("bad json");
        assert_eq!(rethink.assessment.leaning_towards, Leaning::Neutral);
        assert!(rethink.is_fallback());

        let last = final_verdict("bad json");
        assert_eq!(last.decision, Decision::Undetermined);
        assert_eq!(last.decision.winner(), None);
        assert!(last.is_fallback());
        assert!(last.summary.starts_with(NOTICE));
    }

    #[test]
    fn test_fallback_survives_serde_roundtrip() {
        let verdict = final_verdict("bad json");
        let json = serde_json::to_string(&verdict).unwrap();
        let restored: FinalVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, verdict);
    }
}
