//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// All three stages, standings, and usage
    Full,
    /// Only the chairman's final answer
    Final,
    /// The whole verdict as pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Resolve a config-file format name; unknown names fall back to `Full`
    pub fn from_config_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "final" => Self::Final,
            "json" => Self::Json,
            _ => Self::Full,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - models answer, rank each other, and synthesize")]
#[command(long_about = r#"
llm-council puts one question before a council of models in three stages:

1. Responses: every council member answers independently, in parallel
2. Peer Rankings: each member ranks the anonymized set of answers
3. Synthesis: a chairman model writes the final answer from the full record

Configuration files are loaded from (in priority order):
1. --config <path>                        Explicit config file
2. ./council.toml or ./.council.toml      Project-level config
3. ~/.config/llm-council/config.toml      Global config

Examples:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -m openai/gpt-5.1 -m anthropic/claude-sonnet-4.5 "Compare async runtimes"
  llm-council --attach notes.md --output final "Summarize the attached notes"
  llm-council --list
"#)]
pub struct Cli {
    /// The question to put before the council
    pub prompt: Option<String>,

    /// Council member models (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model that synthesizes the final answer
    #[arg(long, value_name = "MODEL")]
    pub chairman: Option<String>,

    /// Attach a file to the question (can be specified multiple times)
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Append the turn to an existing conversation
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,

    /// Do not persist this run
    #[arg(long)]
    pub no_store: bool,

    /// List stored conversations and exit
    #[arg(long)]
    pub list: bool,

    /// Print a stored conversation and exit
    #[arg(long, value_name = "ID")]
    pub show: Option<String>,

    /// Delete a stored conversation and exit
    #[arg(long, value_name = "ID")]
    pub delete: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Fix the anonymization shuffle (reproducible label assignment)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_invocation() {
        let cli = Cli::parse_from(["llm-council", "why is the sky blue?"]);
        assert_eq!(cli.prompt.as_deref(), Some("why is the sky blue?"));
        assert!(cli.model.is_empty());
        assert!(!cli.no_store);
    }

    #[test]
    fn test_parse_repeated_models_and_chairman() {
        let cli = Cli::parse_from([
            "llm-council",
            "-m",
            "vendor/alpha",
            "-m",
            "vendor/beta",
            "--chairman",
            "vendor/chair",
            "question",
        ]);
        assert_eq!(cli.model, vec!["vendor/alpha", "vendor/beta"]);
        assert_eq!(cli.chairman.as_deref(), Some("vendor/chair"));
    }

    #[test]
    fn test_parse_store_flags() {
        let cli = Cli::parse_from(["llm-council", "--list"]);
        assert!(cli.list);
        assert!(cli.prompt.is_none());

        let cli = Cli::parse_from(["llm-council", "--show", "abc-123"]);
        assert_eq!(cli.show.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_format_from_config_name() {
        assert_eq!(OutputFormat::from_config_name("final"), OutputFormat::Final);
        assert_eq!(OutputFormat::from_config_name("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config_name("fancy"), OutputFormat::Full);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["llm-council", "-vv", "question"]);
        assert_eq!(cli.verbose, 2);
    }
}
