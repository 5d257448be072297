//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types only
//! after validation.

mod behavior;
mod council;
mod logging;
mod output;
mod repl;
mod server;

pub use behavior::FileBehaviorConfig;
pub use council::{FileChairmanConfig, FileCouncilConfig, FileMemberConfig};
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;
pub use server::FileServerConfig;

use council_application::ExecutionParams;
use council_domain::{ConfigIssue, ConfigIssueCode, Council, DomainError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that prevent a usable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("invalid council: {0}")]
    Domain(#[from] DomainError),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ordered council members
    pub council: FileCouncilConfig,
    /// Synthesizing node
    pub chairman: Option<FileChairmanConfig>,
    /// Call bounds and retries
    pub behavior: FileBehaviorConfig,
    /// HTTP entry point
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.council.validate();

        match &self.chairman {
            Some(chairman) => issues.extend(chairman.validate(&self.council)),
            None => issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingChairman,
                "chairman: a [chairman] section with url and model is required",
            )),
        }

        issues.extend(self.behavior.validate());
        issues
    }

    /// Build the council, failing on any error-severity issue.
    pub fn to_council(&self) -> Result<Council, ConfigError> {
        let errors: Vec<ConfigIssue> = self
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .collect();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }

        let chairman = self
            .chairman
            .as_ref()
            .map(FileChairmanConfig::to_chairman)
            .ok_or_else(|| {
                ConfigError::Invalid(vec![ConfigIssue::error(
                    ConfigIssueCode::MissingChairman,
                    "chairman: missing",
                )])
            })?;

        Ok(Council::new(self.council.to_roster()?, chairman))
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        self.behavior.to_execution_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::OutputFormat;
    use std::time::Duration;

    const FULL: &str = r#"
[[council.members]]
name = "Council_1"
url = "http://100.64.243.5:11434"
model = "gemma2:2b"

[[council.members]]
name = "Council_2"
url = "http://100.123.209.93:11434"
model = "llama3.2:1b"

[[council.members]]
name = "Council_3"
url = "http://100.107.144.10:11435"
model = "qwen2.5:1.5b"

[chairman]
url = "http://100.114.119.33:11434"
model = "llama3.2:3b"

[behavior]
request_timeout_secs = 120

[output]
format = "full"
color = false

[repl]
show_progress = false
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        assert_eq!(config.council.members.len(), 3);
        assert_eq!(config.council.members[2].url, "http://100.107.144.10:11435");
        assert_eq!(config.chairman.as_ref().unwrap().model, "llama3.2:3b");
        assert_eq!(config.behavior.request_timeout_secs, 120);
        assert_eq!(config.behavior.probe_timeout_ms, 1500);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_to_council() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let council = config.to_council().unwrap();
        assert_eq!(
            council.roster.names(),
            vec!["Council_1", "Council_2", "Council_3"]
        );
        assert_eq!(council.chairman.endpoint.url, "http://100.114.119.33:11434");
        assert_eq!(
            config.to_execution_params().request_timeout,
            Duration::from_secs(120)
        );
    }

    #[test]
    fn test_example_config_is_valid() {
        let example = include_str!("../../../../council.example.toml");
        let config: FileConfig = toml::from_str(example).unwrap();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_council().unwrap().roster.len(), 3);
        assert_eq!(config.output.format, Some(OutputFormat::Final));
        assert_eq!(config.logging.transcript, None);
    }

    #[test]
    fn test_default_config_is_invalid() {
        let config = FileConfig::default();
        let codes: Vec<_> = config.validate().into_iter().map(|i| i.code).collect();
        assert!(codes.contains(&ConfigIssueCode::NoMembers));
        assert!(codes.contains(&ConfigIssueCode::MissingChairman));

        let err = config.to_council().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref issues) if issues.len() == 2));
        assert!(err.to_string().contains("chairman"));
    }

    #[test]
    fn test_warnings_do_not_block_council() {
        let mut config: FileConfig = toml::from_str(FULL).unwrap();
        config.chairman = Some(FileChairmanConfig {
            url: "http://100.64.243.5:11434".to_string(),
            model: "gemma2:2b".to_string(),
        });
        assert_eq!(config.validate().len(), 1);
        assert!(config.to_council().is_ok());
    }
}
