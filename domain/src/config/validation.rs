//! Structured configuration issues.
//!
//! Startup validation reports every problem it finds instead of stopping at
//! the first one. `Error` issues abort startup; `Warning` issues are logged.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[[council.members]]` is missing or empty.
    NoMembers,
    /// A single member would have to review itself.
    TooFewMembers { count: usize },
    /// Two members share a name; result mappings are keyed by name.
    DuplicateMemberName { name: String },
    /// A required string field is blank.
    EmptyField { field: String },
    /// `[chairman]` is missing.
    MissingChairman,
    /// A timeout of zero would fail every call.
    ZeroTimeout { field: String },
    /// The chairman shares an endpoint and model with a member.
    ChairmanIsMember { name: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let e = ConfigIssue::error(ConfigIssueCode::NoMembers, "no members");
        assert!(e.is_error());
        let w = ConfigIssue::warning(
            ConfigIssueCode::ChairmanIsMember {
                name: "a".to_string(),
            },
            "shared",
        );
        assert!(!w.is_error());
    }

    #[test]
    fn test_display() {
        let e = ConfigIssue::error(ConfigIssueCode::TooFewMembers { count: 1 }, "need two");
        assert_eq!(e.to_string(), "error: need two");
    }
}
