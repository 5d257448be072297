//! Application-level configuration.
//!
//! - [`ExecutionParams`] - per-call bounds and retry policy for sessions and probes

pub mod execution_params;

pub use execution_params::ExecutionParams;
