//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// All three stages: opinions, scored reviews, final answer
    Full,
    /// Only the chairman's final answer
    Final,
    /// The JSON envelope, as served over HTTP
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Final => council_domain::OutputFormat::Final,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - local models answer, critique each other, and a chairman decides")]
#[command(long_about = r#"
LLM Council sends one question to a council of self-hosted models and
returns a single synthesized answer.

The process has three stages:
1. Initial Opinions: every member answers the question in parallel
2. Peer Review: every member critiques the next member's answer (ring)
3. Chairman Synthesis: the chairman merges everything into a final answer

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables (e.g. COUNCIL_BEHAVIOR__REQUEST_TIMEOUT_SECS)
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "What is the capital of Australia?"
  llm-council --output full "Compare TCP and QUIC"
  llm-council --chat
  llm-council --serve --port 8000
"#)]
pub struct Cli {
    /// The question to ask the council (not required in chat, serve or health mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with_all = ["serve", "health"])]
    pub chat: bool,

    /// Serve the HTTP API (POST /api/chat, GET /api/health)
    #[arg(long, conflicts_with = "health")]
    pub serve: bool,

    /// Probe every node and exit
    #[arg(long)]
    pub health: bool,

    /// Output format (defaults to [output] format, then "final")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Bind address for --serve (overrides [server] host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port for --serve (overrides [server] port)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Write a daily-rotated log file into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_question_with_output() {
        let cli = Cli::parse_from(["llm-council", "-o", "full", "-vv", "What is 6x7?"]);
        assert_eq!(cli.question.as_deref(), Some("What is 6x7?"));
        assert_eq!(cli.output, Some(OutputFormat::Full));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.chat);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["llm-council", "--serve", "--host", "0.0.0.0", "--port", "9000"]);
        assert!(cli.serve);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9000));
    }

    #[test]
    fn test_chat_conflicts_with_serve() {
        assert!(Cli::try_parse_from(["llm-council", "--chat", "--serve"]).is_err());
    }
}
