//! Console output formatter for verdicts and case status

use colored::Colorize;
use tribunal_domain::{
    CaseState, FinalVerdict, InterimVerdict, Leaning, MAX_ROUNDS, RethinkVerdict, Side,
    TurnRole, Verdict, VerdictMetadata,
};

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_interim(verdict: &InterimVerdict) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Interim Verdict"));
        output.push('\n');
        output.push_str(&Self::provisional_banner(verdict));
        output.push_str(&Self::assessment(verdict));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_rethink(verdict: &RethinkVerdict) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Reconsidered Verdict"));
        output.push('\n');
        output.push_str(&Self::provisional_banner(verdict));
        output.push_str(&Self::assessment(&verdict.assessment));
        output.push_str(&Self::field("Changes:", &verdict.changes_from_previous));
        output.push_str(&Self::field("Remaining concerns:", &verdict.remaining_concerns));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_final(verdict: &FinalVerdict, metadata: Option<&VerdictMetadata>) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Final Verdict"));
        output.push('\n');
        output.push_str(&Self::provisional_banner(verdict));

        let decision = match verdict.decision.winner() {
            Some(side) => format!("{} prevails", side.label()).green().bold(),
            None => "Undetermined".yellow().bold(),
        };
        output.push_str(&format!("{} {}\n\n", "Decision:".cyan().bold(), decision));
        output.push_str(&format!("{}\n", verdict.summary));

        output.push_str(&Self::section_header("Case"));
        output.push_str(&format!("{}\n", verdict.case_summary));
        for (side, summary) in [
            (Side::A, &verdict.side_a_arguments),
            (Side::B, &verdict.side_b_arguments),
        ] {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {}: {} ──", side.label(), summary.title).yellow().bold(),
                summary.content
            ));
        }

        output.push_str(&Self::section_header("Reasoning"));
        output.push_str(&format!("{}\n", verdict.reasoning));
        output.push_str(&Self::list("Legal basis:", &verdict.legal_basis));
        output.push_str(&Self::list("Key findings:", &verdict.key_findings));
        output.push_str(&Self::field("Remedy:", &verdict.remedy));

        if let Some(meta) = metadata {
            output.push_str(&format!(
                "\n{}\n",
                format!(
                    "Generated {} | arguments A: {} B: {} | documents: {}",
                    meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    meta.argument_count_side_a,
                    meta.argument_count_side_b,
                    meta.total_documents
                )
                .dimmed()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Judge reply to one argument round
    pub fn format_reply(side: Side, reply: &str, remaining_rounds: u32) -> String {
        format!(
            "{} {}\n\n{}\n\n{}\n",
            "Judge →".cyan().bold(),
            side.label().bold(),
            reply,
            format!("{}/{} rounds remaining for {}", remaining_rounds, MAX_ROUNDS, side.label())
                .dimmed()
        )
    }

    /// Phase, round counters and transcript of a case
    pub fn format_case(case: &CaseState) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Case Status"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Phase:".cyan().bold(),
            case.phase().display_name()
        ));

        for side in Side::BOTH {
            output.push_str(&Self::section_header(side.label()));
            match case.submission(side) {
                Some(submission) => {
                    output.push_str(&format!("{}\n", submission.primary_argument));
                    if !submission.files.is_empty() {
                        output.push_str(&format!(
                            "{} {}\n",
                            "Documents:".dimmed(),
                            submission
                                .files
                                .iter()
                                .map(|f| f.name.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ));
                    }
                }
                None => output.push_str(&format!("{}\n", "(no submission yet)".dimmed())),
            }
            output.push_str(&format!(
                "{} {}/{}\n",
                "Rounds used:".dimmed(),
                case.argument_count(side),
                MAX_ROUNDS
            ));
            for turn in case.turns(side) {
                let who = match turn.role {
                    TurnRole::User => side.label().yellow().bold(),
                    TurnRole::Judge => "Judge".cyan().bold(),
                    TurnRole::System => "Notice".dimmed(),
                };
                output.push_str(&format!("  {} {}\n", who, turn.content));
            }
        }

        if let Some(verdict) = case.interim_verdict() {
            output.push_str(&Self::section_header("Current Interim Verdict"));
            output.push_str(&Self::provisional_banner(verdict));
            output.push_str(&Self::assessment(verdict));
        }
        if let Some(verdict) = case.final_verdict() {
            output.push('\n');
            output.push_str(&Self::format_final(verdict, None));
        } else {
            output.push_str(&Self::footer());
        }
        output
    }

    /// Error line; transport failures arrive already generic
    pub fn format_error(message: &str) -> String {
        format!("{} {}\n", "Error:".red().bold(), message)
    }

    fn assessment(verdict: &InterimVerdict) -> String {
        let leaning = match verdict.leaning_towards {
            Leaning::Neutral => "Neutral".normal(),
            other => other.as_str().yellow().bold(),
        };
        let mut output = format!(
            "{} {}\n\n{}\n",
            "Leaning:".cyan().bold(),
            leaning,
            verdict.summary
        );
        output.push_str(&Self::field("Reasoning:", &verdict.reasoning));
        output.push_str(&Self::field("Side A strengths:", &verdict.strengths_a));
        output.push_str(&Self::field("Side B strengths:", &verdict.strengths_b));
        output.push_str(&Self::field(
            "Needs clarification:",
            &verdict.areas_needing_clarification,
        ));
        output
    }

    fn provisional_banner(verdict: &impl Verdict) -> String {
        if verdict.is_fallback() {
            format!(
                "{}\n\n",
                "PROVISIONAL: the adjudicator's response could not be read; this is a neutral placeholder."
                    .yellow()
                    .bold()
            )
        } else {
            String::new()
        }
    }

    fn field(label: &str, value: &str) -> String {
        format!("\n{}\n{}\n", label.cyan().bold(), value)
    }

    fn list(label: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        let mut output = format!("\n{}\n", label.cyan().bold());
        for item in items {
            output.push_str(&format!("  * {}\n", item));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
