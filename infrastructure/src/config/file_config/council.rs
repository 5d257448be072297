//! Council roster and chairman from TOML (`[[council.members]]`, `[chairman]`)

use council_domain::{
    Chairman, ConfigIssue, ConfigIssueCode, DomainError, Member, Roster,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `[[council.members]]` entry
///
/// # Example
///
/// ```toml
/// [[council.members]]
/// name = "Council_1"
/// url = "http://100.64.243.5:11434"
/// model = "gemma2:2b"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemberConfig {
    pub name: String,
    pub url: String,
    pub model: String,
}

/// Raw council configuration from TOML
///
/// Member order is roster order, which fixes the review ring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    pub members: Vec<FileMemberConfig>,
}

/// Raw `[chairman]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChairmanConfig {
    pub url: String,
    pub model: String,
}

impl FileCouncilConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        match self.members.len() {
            0 => issues.push(ConfigIssue::error(
                ConfigIssueCode::NoMembers,
                "council.members: at least two members are required",
            )),
            1 => issues.push(ConfigIssue::error(
                ConfigIssueCode::TooFewMembers { count: 1 },
                "council.members: a single member would review itself, at least two are required",
            )),
            _ => {}
        }

        let mut seen = HashSet::new();
        for (i, member) in self.members.iter().enumerate() {
            for (field, value) in [
                ("name", &member.name),
                ("url", &member.url),
                ("model", &member.model),
            ] {
                if value.trim().is_empty() {
                    let field = format!("council.members[{}].{}", i, field);
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyField {
                            field: field.clone(),
                        },
                        format!("{}: cannot be empty", field),
                    ));
                }
            }
            if !member.name.trim().is_empty() && !seen.insert(member.name.trim()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateMemberName {
                        name: member.name.clone(),
                    },
                    format!("council.members: duplicate member name '{}'", member.name),
                ));
            }
        }

        issues
    }

    pub fn to_roster(&self) -> Result<Roster, DomainError> {
        Roster::new(
            self.members
                .iter()
                .map(|m| Member::new(m.name.trim(), m.url.trim(), m.model.as_str()))
                .collect(),
        )
    }
}

impl FileChairmanConfig {
    pub fn validate(&self, council: &FileCouncilConfig) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [("chairman.url", &self.url), ("chairman.model", &self.model)] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: field.to_string(),
                    },
                    format!("{}: cannot be empty", field),
                ));
            }
        }

        if let Some(member) = council
            .members
            .iter()
            .find(|m| m.url.trim() == self.url.trim() && m.model.trim() == self.model.trim())
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ChairmanIsMember {
                    name: member.name.clone(),
                },
                format!(
                    "chairman: same endpoint and model as member '{}', it will judge its own answer",
                    member.name
                ),
            ));
        }

        issues
    }

    pub fn to_chairman(&self) -> Chairman {
        Chairman::new(self.url.trim(), self.model.as_str())
    }
}
