//! Inference gateway port
//!
//! Defines the interface for sending one prompt to one backend endpoint.

use async_trait::async_trait;
use council_domain::Endpoint;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to an inference backend
///
/// These never leave the application layer: the
/// [`InferenceClient`](crate::use_cases::inference_client::InferenceClient)
/// turns every one of them into a failed
/// [`InferenceResult`](council_domain::InferenceResult).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for text-completion backends
///
/// One call, one whole response: no streaming, no sessions. Implementations
/// must be safe to call concurrently from many tasks.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Send `prompt` to the model at `endpoint` and return the reply text.
    ///
    /// An empty string is a valid return here; deciding that empty means
    /// failure is the caller's job.
    async fn generate(&self, endpoint: &Endpoint, prompt: &str) -> Result<String, GatewayError>;
}
