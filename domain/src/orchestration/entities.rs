//! Orchestration domain entities

use crate::core::member::{Chairman, Roster};
use serde::{Deserialize, Serialize};

/// Phase of a council session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Every member answers the raw query
    Opinions,
    /// Every member critiques its ring successor's opinion
    Review,
    /// The chairman merges opinions and reviews into one answer
    Synthesis,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Opinions => "opinions",
            Phase::Review => "review",
            Phase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Opinions => "Initial Opinions",
            Phase::Review => "Peer Review",
            Phase::Synthesis => "Chairman Synthesis",
        }
    }

    /// 1-based stage number as shown to users
    pub fn number(&self) -> u8 {
        match self {
            Phase::Opinions => 1,
            Phase::Review => 2,
            Phase::Synthesis => 3,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Static council definition injected into the orchestrator (Entity)
///
/// Built once from configuration; every session reads it, none mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Council {
    pub roster: Roster,
    pub chairman: Chairman,
}

impl Council {
    pub fn new(roster: Roster, chairman: Chairman) -> Self {
        Self { roster, chairman }
    }
}
