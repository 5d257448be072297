//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    health_probe::{HealthProbe, NodeHealth, NodeStatus},
    inference_gateway::{GatewayError, InferenceGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::check_health::{CheckHealthUseCase, HealthReport};
pub use use_cases::inference_client::InferenceClient;
pub use use_cases::run_council::RunCouncilUseCase;
