//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_health;
pub mod inference_client;
pub mod run_council;
