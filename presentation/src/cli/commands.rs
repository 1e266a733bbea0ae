//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tribunal_domain::Side;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted, colored text
    Text,
    /// JSON response (`{success, verdict?, error?}` plus the case)
    Json,
}

/// CLI arguments for ai-tribunal
#[derive(Parser, Debug)]
#[command(name = "tribunal")]
#[command(author, version, about = "AI adjudicator for two-party disputes")]
#[command(long_about = r#"
Tribunal runs a dispute between two sides past an AI judge.

A case moves through three phases:
1. Awaiting submissions: each side submits its argument once
2. Deliberating: an interim verdict is issued; each side may post up to 5
   rebuttals, and the judge may be asked to rethink at any time
3. Concluded: the final verdict is issued

The case is kept in a JSON file (--case) between commands.

Configuration files are loaded from (in priority order):
1. TRIBUNAL_* environment variables
2. --config <path>     Explicit config file
3. ./tribunal.toml     Project-level config
4. ~/.config/ai-tribunal/config.toml   Global config

Example:
  tribunal submit A "The supplier delivered three weeks late" --file contract.pdf
  tribunal submit B "The delay was caused by a port strike"
  tribunal argue A "The strike ended before the delivery date"
  tribunal rethink
  tribunal conclude
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Case file holding the deliberation state
    #[arg(long, global = true, value_name = "PATH", default_value = "case.json")]
    pub case: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit one side's case
    Submit {
        /// Side submitting (A or B)
        side: Side,

        /// Primary argument
        primary_argument: String,

        /// Detailed evidence
        #[arg(long)]
        evidence: Option<String>,

        /// Response to the other side's case
        #[arg(long)]
        response: Option<String>,

        /// Supporting document to upload (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },

    /// Regenerate the interim verdict from the submissions
    Interim,

    /// Post a rebuttal round for one side
    Argue {
        /// Side arguing (A or B)
        side: Side,

        /// Argument text
        argument: String,
    },

    /// Ask the judge to reconsider the interim verdict
    Rethink,

    /// Issue the final verdict
    Conclude,

    /// Show the case status and transcript
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_parses_side_and_files() {
        let cli = Cli::try_parse_from([
            "tribunal",
            "--case",
            "dispute.json",
            "submit",
            "b",
            "B denies breach",
            "--file",
            "a.pdf",
            "--file",
            "b.pdf",
        ])
        .unwrap();

        assert_eq!(cli.case, PathBuf::from("dispute.json"));
        match cli.command.unwrap() {
            Command::Submit { side, files, .. } => {
                assert_eq!(side, Side::B);
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tribunal", "conclude", "-o", "json", "-vv"]).unwrap();
        assert_eq!(cli.command, Some(Command::Conclude));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_invalid_side_rejected() {
        assert!(Cli::try_parse_from(["tribunal", "argue", "C", "text"]).is_err());
    }
}
