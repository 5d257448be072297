//! Ollama-compatible inference backend
//!
//! One adapter serves every node: the endpoint (base URL + model) travels
//! with each call, and all calls share a single connection pool.

pub mod gateway;
pub mod protocol;

pub use gateway::OllamaGateway;
