//! Presentation layer for llm-council
//!
//! This crate contains CLI definitions, output formatters, progress
//! reporters, the interactive chat interface and the HTTP entry point.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{AppState, CouncilServer, shutdown_on_signal};
