//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileBehaviorConfig, FileChairmanConfig, FileConfig,
    FileCouncilConfig, FileLoggingConfig, FileMemberConfig, FileOutputConfig, FileOutputFormat,
    FileReplConfig, FileServerConfig,
};
pub use logging::JsonlConversationLogger;
pub use ollama::OllamaGateway;
