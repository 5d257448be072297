//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use council_application::{CheckHealthUseCase, HealthProbe, InferenceGateway, RunCouncilUseCase};
use council_domain::{OutputFormat, Question};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Members,
    Health,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`; `None` for anything else
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim();
        if !cmd.starts_with('/') {
            return None;
        }
        Some(match cmd {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/members" | "/m" => ReplCommand::Members,
            "/health" => ReplCommand::Health,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl<G: InferenceGateway + 'static> {
    use_case: Arc<RunCouncilUseCase<G>>,
    health: Arc<CheckHealthUseCase<dyn HealthProbe>>,
    show_progress: bool,
    format: OutputFormat,
    history_path: Option<PathBuf>,
}

impl<G: InferenceGateway + 'static> ChatRepl<G> {
    pub fn new(
        use_case: Arc<RunCouncilUseCase<G>>,
        health: Arc<CheckHealthUseCase<dyn HealthProbe>>,
    ) -> Self {
        Self {
            use_case,
            health,
            show_progress: true,
            format: OutputFormat::Final,
            history_path: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Persist line history at `path`
    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("council".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           LLM Council - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_members();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /members, /m      - Show council members and chairman");
        println!("  /health           - Probe every node");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    fn print_members(&self) {
        let council = self.use_case.council();
        println!("{}", "Council:".cyan().bold());
        for member in council.roster.iter() {
            println!("  - {} ({} @ {})", member.name, member.endpoint.model, member.endpoint.url);
        }
        println!(
            "  * Chairman ({} @ {})",
            council.chairman.endpoint.model, council.chairman.endpoint.url
        );
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::Members => {
                println!();
                self.print_members();
                false
            }
            ReplCommand::Health => {
                let report = self.health.execute().await;
                println!();
                println!("{}", ConsoleFormatter::format_health(&report));
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_question(&self, line: &str) {
        let question = match Question::parse(line) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                return;
            }
        };
        println!();

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case
                .execute_with_progress(&question, &progress)
                .await
        } else {
            self.use_case.execute(&question).await
        };

        println!("{}", ConsoleFormatter::render(&result, self.format));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/quit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse(" /h "), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/members"), Some(ReplCommand::Members));
        assert_eq!(ReplCommand::parse("/health"), Some(ReplCommand::Health));
        assert_eq!(
            ReplCommand::parse("/models"),
            Some(ReplCommand::Unknown("/models".to_string()))
        );
    }

    #[test]
    fn test_questions_are_not_commands() {
        assert_eq!(ReplCommand::parse("What is 6x7?"), None);
        assert_eq!(ReplCommand::parse("is 1/2 > 0?"), None);
    }
}
