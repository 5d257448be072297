//! Call bounds and retry settings from TOML (`[behavior]` section)

use council_application::ExecutionParams;
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Upper bound for one inference call
    pub request_timeout_secs: u64,
    /// Bound for establishing the TCP connection
    pub connect_timeout_secs: u64,
    /// Bound for one health probe
    pub probe_timeout_ms: u64,
    /// Extra chairman attempts after a failed synthesis
    pub chairman_retries: u32,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 180,
            connect_timeout_secs: 10,
            probe_timeout_ms: 1500,
            chairman_retries: 0,
        }
    }
}

impl FileBehaviorConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("behavior.request_timeout_secs", self.request_timeout_secs),
            ("behavior.connect_timeout_secs", self.connect_timeout_secs),
            ("behavior.probe_timeout_ms", self.probe_timeout_ms),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout {
                    field: field.to_string(),
                },
                format!("{}: cannot be 0", field),
            )
        })
        .collect()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_probe_timeout(Duration::from_millis(self.probe_timeout_ms))
            .with_chairman_retries(self.chairman_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeouts_are_errors() {
        let config = FileBehaviorConfig {
            request_timeout_secs: 0,
            probe_timeout_ms: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_to_execution_params() {
        let params = FileBehaviorConfig {
            request_timeout_secs: 60,
            chairman_retries: 2,
            ..Default::default()
        }
        .to_execution_params();
        assert_eq!(params.request_timeout, Duration::from_secs(60));
        assert_eq!(params.probe_timeout, Duration::from_millis(1500));
        assert_eq!(params.chairman_retries, 2);
    }
}
