//! Council membership: endpoints, members, the ordered roster and the chairman.
//!
//! All of these are loaded once at startup and never mutated afterwards.
//! The roster is shared read-only across every concurrent call of every
//! session.

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Network address plus the model to invoke there
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Base URL of the backend, e.g. `http://100.64.243.5:11434`
    pub url: String,
    pub model: Model,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, model: impl Into<Model>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
        }
    }

    /// Join an API path onto the base URL without doubling slashes
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.model, self.url)
    }
}

/// A peer on the council
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Logical name, unique within a roster
    pub name: String,
    pub endpoint: Endpoint,
}

impl Member {
    pub fn new(name: impl Into<String>, url: impl Into<String>, model: impl Into<Model>) -> Self {
        Self {
            name: name.into(),
            endpoint: Endpoint::new(url, model),
        }
    }
}

/// Ordered sequence of council members
///
/// Order is significant: it is the fan-out order, the keying order of every
/// result mapping, and it defines ring adjacency for peer review.
/// A roster always has at least two members with distinct names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    /// Minimum roster size for a non-degenerate review ring
    pub const MIN_MEMBERS: usize = 2;

    pub fn new(members: Vec<Member>) -> Result<Self, DomainError> {
        if members.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        if members.len() < Self::MIN_MEMBERS {
            return Err(DomainError::RosterTooSmall(members.len()));
        }

        let mut seen = HashSet::new();
        for member in &members {
            if member.name.trim().is_empty() {
                return Err(DomainError::InvalidMember("member name cannot be empty".to_string()));
            }
            if member.endpoint.url.trim().is_empty() {
                return Err(DomainError::InvalidMember(format!(
                    "{}: url cannot be empty",
                    member.name
                )));
            }
            if member.endpoint.model.is_empty() {
                return Err(DomainError::InvalidMember(format!(
                    "{}: model cannot be empty",
                    member.name
                )));
            }
            if !seen.insert(member.name.as_str()) {
                return Err(DomainError::DuplicateMember(member.name.clone()));
            }
        }

        Ok(Self { members })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }
}

/// The single authority that writes the final synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chairman {
    pub endpoint: Endpoint,
}

impl Chairman {
    /// Label used for logging and progress
    pub const LABEL: &'static str = "CHAIRMAN";

    pub fn new(url: impl Into<String>, model: impl Into<Model>) -> Self {
        Self {
            endpoint: Endpoint::new(url, model),
        }
    }
}
