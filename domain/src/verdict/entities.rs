//! Verdict entities
//!
//! Field names on the wire are the exact names the backend is asked to
//! return (see [`crate::prompt::VerdictPrompt`]), so a parsed response
//! deserializes straight into these types.

use crate::case::side::Side;
use crate::core::model::Model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Which side an interim assessment currently favours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leaning {
    #[serde(rename = "Side A")]
    SideA,
    #[serde(rename = "Side B")]
    SideB,
    Neutral,
}

impl Leaning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leaning::SideA => "Side A",
            Leaning::SideB => "Side B",
            Leaning::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Leaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a final verdict.
///
/// A genuine adjudication always names a side. `Undetermined` is reserved
/// for the fallback verdict; [`crate::verdict::parsing::decode_final`]
/// refuses it from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Side A")]
    SideA,
    #[serde(rename = "Side B")]
    SideB,
    Undetermined,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::SideA => "Side A",
            Decision::SideB => "Side B",
            Decision::Undetermined => "Undetermined",
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Decision::SideA => Some(Side::A),
            Decision::SideB => Some(Side::B),
            Decision::Undetermined => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a verdict came from.
///
/// Durable records must keep this tag: a fallback is a placeholder, not an
/// adjudication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerdictOrigin {
    Adjudicated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<Model>,
    },
    Fallback {
        reason: String,
    },
}

impl Default for VerdictOrigin {
    fn default() -> Self {
        VerdictOrigin::Adjudicated { model: None }
    }
}

impl VerdictOrigin {
    pub fn adjudicated(model: Model) -> Self {
        VerdictOrigin::Adjudicated { model: Some(model) }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        VerdictOrigin::Fallback {
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, VerdictOrigin::Fallback { .. })
    }
}

/// Accept either a string or a list of strings (joined by newlines).
fn text_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrList {
        Text(String),
        List(Vec<String>),
    }

    Ok(match TextOrList::deserialize(deserializer)? {
        TextOrList::Text(s) => s,
        TextOrList::List(items) => items.join("\n"),
    })
}

/// Common surface of every verdict kind: where it came from.
pub trait Verdict {
    fn origin(&self) -> &VerdictOrigin;
    fn set_origin(&mut self, origin: VerdictOrigin);

    fn is_fallback(&self) -> bool {
        self.origin().is_fallback()
    }
}

/// Non-final assessment issued during deliberation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterimVerdict {
    pub summary: String,
    pub reasoning: String,
    pub leaning_towards: Leaning,
    #[serde(deserialize_with = "text_or_list")]
    pub strengths_a: String,
    #[serde(deserialize_with = "text_or_list")]
    pub strengths_b: String,
    #[serde(deserialize_with = "text_or_list")]
    pub areas_needing_clarification: String,
    #[serde(default)]
    pub origin: VerdictOrigin,
}

impl Verdict for InterimVerdict {
    fn origin(&self) -> &VerdictOrigin {
        &self.origin
    }

    fn set_origin(&mut self, origin: VerdictOrigin) {
        self.origin = origin;
    }
}

/// Interim assessment reconsidered in light of the rebuttal rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RethinkVerdict {
    #[serde(flatten)]
    pub assessment: InterimVerdict,
    #[serde(deserialize_with = "text_or_list")]
    pub changes_from_previous: String,
    #[serde(deserialize_with = "text_or_list")]
    pub remaining_concerns: String,
}

impl Verdict for RethinkVerdict {
    fn origin(&self) -> &VerdictOrigin {
        &self.assessment.origin
    }

    fn set_origin(&mut self, origin: VerdictOrigin) {
        self.assessment.origin = origin;
    }
}

/// Titled summary of one side's case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSummary {
    pub title: String,
    pub content: String,
}

/// Terminal, structured decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalVerdict {
    pub decision: Decision,
    pub summary: String,
    pub case_summary: String,
    pub side_a_arguments: ArgumentSummary,
    pub side_b_arguments: ArgumentSummary,
    pub reasoning: String,
    pub legal_basis: Vec<String>,
    pub key_findings: Vec<String>,
    pub remedy: String,
    #[serde(default)]
    pub origin: VerdictOrigin,
}

impl Verdict for FinalVerdict {
    fn origin(&self) -> &VerdictOrigin {
        &self.origin
    }

    fn set_origin(&mut self, origin: VerdictOrigin) {
        self.origin = origin;
    }
}

/// Bookkeeping attached to a final verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictMetadata {
    pub generated_at: DateTime<Utc>,
    pub argument_count_side_a: u32,
    pub argument_count_side_b: u32,
    pub total_documents: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interim_decodes_backend_shape() {
        let json = serde_json::json!({
            "summary": "Both sides have merit.",
            "reasoning": "The contract is ambiguous.",
            "leaningTowards": "Side A",
            "strengthsA": ["Signed contract", "Invoices"],
            "strengthsB": "Delivery records",
            "areasNeedingClarification": "Payment dates"
        });
        let verdict: InterimVerdict = serde_json::from_value(json).unwrap();
        assert_eq!(verdict.leaning_towards, Leaning::SideA);
        assert_eq!(verdict.strengths_a, "Signed contract\nInvoices");
        assert!(!verdict.is_fallback());
    }

    #[test]
    fn test_unknown_leaning_rejected() {
        let json = serde_json::json!({
            "summary": "s", "reasoning": "r", "leaningTowards": "Plaintiff",
            "strengthsA": "a", "strengthsB": "b", "areasNeedingClarification": "c"
        });
        assert!(serde_json::from_value::<InterimVerdict>(json).is_err());
    }

    #[test]
    fn test_final_decision_values() {
        let mut json = serde_json::json!({
            "decision": "Side B",
            "summary": "s", "caseSummary": "c",
            "sideAArguments": {"title": "Side A's Argument", "content": "a"},
            "sideBArguments": {"title": "Side B's Argument", "content": "b"},
            "reasoning": "r", "legalBasis": ["x"], "keyFindings": ["y"], "remedy": "z"
        });
        let verdict: FinalVerdict = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(verdict.decision.winner(), Some(Side::B));

        json["decision"] = serde_json::json!("Plaintiff");
        assert!(serde_json::from_value::<FinalVerdict>(json).is_err());
    }

    #[test]
    fn test_origin_tag_serialization() {
        let origin = VerdictOrigin::fallback("unparsable");
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["kind"], "fallback");

        let origin = VerdictOrigin::adjudicated(Model::Gemini25Flash);
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["kind"], "adjudicated");
        assert_eq!(json["model"], "models/gemini-2.5-flash");
    }
}
