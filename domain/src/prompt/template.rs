//! Prompt templates for the deliberation flow
//!
//! Every builder embeds the exact output contract the backend must follow.
//! Absent optional fields are rendered as [`NOT_PROVIDED`] rather than left
//! blank, so silence is never read as an empty affirmative claim.

use crate::case::side::Side;
use crate::case::state::CaseState;
use crate::case::submission::CaseSubmission;
use crate::case::turn::TurnRole;
use crate::core::string::or_placeholder;

/// Placeholder for any absent optional field
pub const NOT_PROVIDED: &str = "Not provided";

const NO_ARGUMENTS: &str = "No additional arguments provided";

const JSON_ONLY: &str =
    "IMPORTANT: Respond ONLY with valid JSON, no markdown formatting, no code blocks, no additional text.";

/// Builders for the prompt sent at each phase
pub struct VerdictPrompt;

impl VerdictPrompt {
    /// Interim verdict: initial submissions only.
    pub fn interim(case: &CaseState) -> String {
        let mut prompt = String::from(
            "You are an AI Judge analyzing a legal case. You have received submissions from both sides.\n",
        );

        for side in Side::BOTH {
            prompt.push_str(&format!(
                "\n{} ({}):\n",
                side.label().to_uppercase(),
                side.role_description()
            ));
            prompt.push_str(&Self::submission_block(side, case.submission(side)));
        }

        prompt.push_str(
            r#"
Your task:
1. Analyze both sides' arguments and evidence carefully
2. Identify strengths and weaknesses in each argument
3. Provide an INTERIM verdict (not final) based on current submissions
4. Be balanced, fair, and legally sound
5. Point out areas where more clarification or evidence is needed

Format your response as a JSON object with exactly these fields:
{
  "summary": "A concise 2-3 sentence interim verdict",
  "reasoning": "Detailed explanation of your analysis (3-4 sentences)",
  "leaningTowards": "Side A" or "Side B" or "Neutral",
  "strengthsA": "Key strengths of Side A's case",
  "strengthsB": "Key strengths of Side B's case",
  "areasNeedingClarification": "What needs more explanation or evidence"
}

"#,
        );
        prompt.push_str(JSON_ONLY);
        prompt
    }

    /// Judge reply to one rebuttal argument. The reply is free text.
    pub fn argument(case: &CaseState, side: Side, argument: &str) -> String {
        let mut prompt = String::from(
            "You are an AI Judge presiding over a legal case. You must analyze arguments from both sides objectively and provide balanced feedback.\n\nCASE INFORMATION:\n",
        );

        for s in Side::BOTH {
            let submission = case.submission(s);
            prompt.push_str(&format!(
                "{} Position: {}\n{} Evidence: {}\n\n",
                s.label(),
                or_placeholder(submission.map(|x| x.primary_argument.as_str()), NOT_PROVIDED),
                s.label(),
                or_placeholder(submission.map(|x| x.detailed_evidence.as_str()), NOT_PROVIDED),
            ));
        }

        prompt.push_str(&format!(
            "CURRENT INTERIM VERDICT:\n{}\n\nCONVERSATION HISTORY:\n{}\n\nLATEST ARGUMENT FROM {}:\n{}\n",
            or_placeholder(
                case.interim_verdict().map(|v| v.summary.as_str()),
                "Initial analysis pending"
            ),
            Self::transcript(case, side).unwrap_or_else(|| "No prior exchanges".to_string()),
            side.label().to_uppercase(),
            or_placeholder(Some(argument), NOT_PROVIDED),
        ));

        prompt.push_str(&format!(
            r#"
YOUR TASK:
1. Acknowledge the argument presented by {side}
2. Evaluate its strengths and weaknesses objectively
3. Ask relevant follow-up questions or point out gaps in logic/evidence
4. Maintain judicial impartiality - do not show bias toward either side
5. Keep your response concise (2-4 sentences) and professional
6. If the argument is strong, acknowledge it. If it's weak, point out why respectfully.

Respond as the AI Judge in plain text:"#,
            side = side.label()
        ));
        prompt
    }

    /// Reconsider the interim verdict in light of every rebuttal round.
    pub fn rethink(case: &CaseState) -> String {
        let current = case.interim_verdict();
        let mut prompt = format!(
            "You are an AI Judge who has been asked to RECONSIDER your verdict after hearing additional arguments.\n\nORIGINAL CASE:\n{}\n{}\n\nCURRENT INTERIM VERDICT:\n{}\nLeaning towards: {}\n",
            Self::primary_line(case, Side::A),
            Self::primary_line(case, Side::B),
            or_placeholder(current.map(|v| v.summary.as_str()), "Initial analysis"),
            current
                .map(|v| v.leaning_towards.as_str())
                .unwrap_or("Neutral"),
        );

        for side in Side::BOTH {
            prompt.push_str(&format!(
                "\nALL EXCHANGES WITH {}:\n{}\n",
                side.label().to_uppercase(),
                Self::transcript(case, side).unwrap_or_else(|| NO_ARGUMENTS.to_string())
            ));
        }

        prompt.push_str(
            r#"
Your task:
1. Review ALL arguments presented during the deliberation phase
2. Identify any NEW compelling points that weren't in original submissions
3. Determine if these new arguments change your assessment
4. Update your verdict accordingly
5. Be intellectually honest - if arguments have swayed you, acknowledge it
6. If arguments haven't changed your view, explain why

Respond with a JSON object with exactly these fields:
{
  "summary": "Updated 2-3 sentence verdict after reconsidering",
  "reasoning": "Detailed explanation of how arguments affected your thinking",
  "leaningTowards": "Side A" or "Side B" or "Neutral",
  "strengthsA": "Key strengths of Side A's case now",
  "strengthsB": "Key strengths of Side B's case now",
  "areasNeedingClarification": "What still needs more explanation or evidence",
  "changesFromPrevious": "What changed from previous verdict (if anything)",
  "remainingConcerns": "Any issues still unclear or concerning"
}

"#,
        );
        prompt.push_str(JSON_ONLY);
        prompt
    }

    /// Final verdict: full submissions plus every exchange.
    pub fn final_verdict(case: &CaseState) -> String {
        let mut prompt = String::from(
            "You are an AI Judge delivering the FINAL VERDICT in a legal case. This is your conclusive decision after reviewing all evidence and hearing all arguments.\n\nCASE DETAILS:\n============\n",
        );

        for side in Side::BOTH {
            prompt.push_str(&format!(
                "\n{} ({}):\n",
                side.label().to_uppercase(),
                side.role_description()
            ));
            prompt.push_str(&Self::submission_block(side, case.submission(side)));
            prompt.push_str(&format!(
                "\nAll Arguments from {}:\n{}\n",
                side.label(),
                Self::numbered_arguments(case, side).unwrap_or_else(|| NO_ARGUMENTS.to_string())
            ));
            if let Some(transcript) = Self::transcript(case, side) {
                prompt.push_str(&format!(
                    "\nExchanges with {}:\n{}\n",
                    side.label(),
                    transcript
                ));
            }
        }

        prompt.push_str(
            r#"
YOUR TASK AS THE AI JUDGE:
==========================
1. Review ALL evidence, initial submissions, and subsequent arguments
2. Weigh the credibility and strength of each side's position
3. Apply relevant legal principles and standards
4. Deliver a FINAL, DEFINITIVE verdict
5. Provide comprehensive reasoning
6. Be fair, balanced, and legally sound
7. Make a clear decision - you MUST choose which side wins

IMPORTANT: This is the FINAL verdict. No more arguments will be heard. Make a decisive ruling.

Respond with a JSON object with exactly these fields:
{
  "decision": "Side A" or "Side B",
  "summary": "3-4 sentence final verdict explaining who wins and why",
  "caseSummary": "2-3 sentences summarizing the parties and core dispute",
  "sideAArguments": {"title": "Side A's Argument", "content": "Summary of Side A's strongest points (3-4 sentences)"},
  "sideBArguments": {"title": "Side B's Argument", "content": "Summary of Side B's strongest points (3-4 sentences)"},
  "reasoning": "4-5 sentences of legal reasoning behind the decision",
  "legalBasis": ["Relevant law, statute, or precedent", "..."],
  "keyFindings": ["Key factual finding", "..."],
  "remedy": "Specific remedy or relief granted"
}

"#,
        );
        prompt.push_str(JSON_ONLY);
        prompt
    }

    // ==================== Helpers ====================

    fn primary_line(case: &CaseState, side: Side) -> String {
        format!(
            "{}: {}",
            side.label(),
            or_placeholder(
                case.submission(side).map(|s| s.primary_argument.as_str()),
                NOT_PROVIDED
            )
        )
    }

    fn submission_block(side: Side, submission: Option<&CaseSubmission>) -> String {
        let field = |f: fn(&CaseSubmission) -> &str| {
            or_placeholder(submission.map(f), NOT_PROVIDED).to_string()
        };
        let files = submission.map(|s| s.files.as_slice()).unwrap_or_default();
        let documents = if files.is_empty() {
            "0 files submitted".to_string()
        } else {
            format!(
                "{} files submitted ({})",
                files.len(),
                files
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        format!(
            "Primary Argument: {}\nDetailed Evidence: {}\nResponse to {}: {}\nDocuments: {}\n",
            field(|s| s.primary_argument.as_str()),
            field(|s| s.detailed_evidence.as_str()),
            side.opponent().label(),
            field(|s| s.response_to_other_side.as_str()),
            documents
        )
    }

    fn numbered_arguments(case: &CaseState, side: Side) -> Option<String> {
        let arguments: Vec<String> = case
            .user_arguments(side)
            .enumerate()
            .map(|(i, text)| format!("Argument {}: {}", i + 1, text))
            .collect();
        (!arguments.is_empty()).then(|| arguments.join("\n\n"))
    }

    /// User and judge turns for one side; system notices are excluded.
    fn transcript(case: &CaseState, side: Side) -> Option<String> {
        let lines: Vec<String> = case
            .turns(side)
            .iter()
            .filter_map(|turn| match turn.role {
                TurnRole::User => Some(format!("{}: {}", side.label(), turn.content)),
                TurnRole::Judge => Some(format!("AI Judge: {}", turn.content)),
                TurnRole::System => None,
            })
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::submission::CaseSubmission;

    fn case() -> CaseState {
        let mut case = CaseState::new();
        case.record_submission(
            Side::A,
            CaseSubmission::new("A claims breach").with_evidence("Signed contract"),
        )
        .unwrap();
        case.record_submission(Side::B, CaseSubmission::new("B denies breach"))
            .unwrap();
        case
    }

    #[test]
    fn test_interim_uses_placeholders_and_contract() {
        let prompt = VerdictPrompt::interim(&case());
        assert!(prompt.contains("Primary Argument: A claims breach"));
        assert!(prompt.contains("Detailed Evidence: Signed contract"));
        assert!(prompt.contains("Detailed Evidence: Not provided"));
        assert!(prompt.contains("\"leaningTowards\""));
        assert!(prompt.contains("\"areasNeedingClarification\""));
        assert!(!prompt.contains("Evidence: \n"));
    }

    #[test]
    fn test_interim_ignores_rebuttals() {
        let mut case = case();
        case.record_round(Side::A, "New evidence X", "Noted.").unwrap();
        let prompt = VerdictPrompt::interim(&case);
        assert!(!prompt.contains("New evidence X"));
    }

    #[test]
    fn test_builders_are_deterministic() {
        let mut case = case();
        case.record_round(Side::B, "Rebuttal", "Please elaborate.")
            .unwrap();
        assert_eq!(VerdictPrompt::rethink(&case), VerdictPrompt::rethink(&case));
        assert_eq!(
            VerdictPrompt::final_verdict(&case),
            VerdictPrompt::final_verdict(&case)
        );
        assert_eq!(
            VerdictPrompt::argument(&case, Side::A, "x"),
            VerdictPrompt::argument(&case, Side::A, "x")
        );
    }

    #[test]
    fn test_argument_prompt_includes_history_without_notices() {
        let mut case = case();
        case.record_round(Side::A, "First point", "Please cite the clause.")
            .unwrap();
        case.record_notice(Side::A, "4 rounds remaining").unwrap();
        let prompt = VerdictPrompt::argument(&case, Side::A, "Clause 7 applies");
        assert!(prompt.contains("Side A: First point"));
        assert!(prompt.contains("AI Judge: Please cite the clause."));
        assert!(prompt.contains("LATEST ARGUMENT FROM SIDE A:\nClause 7 applies"));
        assert!(prompt.contains("Initial analysis pending"));
        assert!(!prompt.contains("rounds remaining"));
    }

    #[test]
    fn test_rethink_and_final_see_full_history() {
        let mut case = case();
        case.record_round(Side::A, "New evidence X", "Noted.").unwrap();
        let rethink = VerdictPrompt::rethink(&case);
        assert!(rethink.contains("New evidence X"));
        assert!(rethink.contains("\"changesFromPrevious\""));
        assert!(rethink.contains(NO_ARGUMENTS));

        let last = VerdictPrompt::final_verdict(&case);
        assert!(last.contains("Argument 1: New evidence X"));
        assert!(last.contains("\"legalBasis\""));
        assert!(last.contains("you MUST choose which side wins"));
    }
}
