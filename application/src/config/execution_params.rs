//! Execution parameters - per-call bounds and retry policy.
//!
//! [`ExecutionParams`] groups the static parameters that control how the
//! use cases talk to backends. These are application-layer concerns, not
//! domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend call control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Upper bound for each individual inference call.
    pub request_timeout: Duration,
    /// Extra attempts for the chairman call after a failure. Member calls
    /// are never retried.
    pub chairman_retries: u32,
    /// Upper bound for each health probe.
    pub probe_timeout: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(180),
            chairman_retries: 0,
            probe_timeout: Duration::from_millis(1500),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_chairman_retries(mut self, retries: u32) -> Self {
        self.chairman_retries = retries;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.request_timeout, Duration::from_secs(180));
        assert_eq!(params.chairman_retries, 0);
        assert_eq!(params.probe_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_request_timeout(Duration::from_secs(30))
            .with_chairman_retries(1)
            .with_probe_timeout(Duration::from_secs(1));

        assert_eq!(params.request_timeout, Duration::from_secs(30));
        assert_eq!(params.chairman_retries, 1);
        assert_eq!(params.probe_timeout, Duration::from_secs(1));
    }
}
