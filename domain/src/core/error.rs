//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only configuration-shaped problems live here. Once a valid roster
/// exists, backend failures are data ([`InferenceOutcome`](crate::InferenceOutcome)),
/// never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No council members configured")]
    EmptyRoster,

    #[error("Council needs at least 2 members for ring review, got {0}")]
    RosterTooSmall(usize),

    #[error("Duplicate council member name: {0}")]
    DuplicateMember(String),

    #[error("Invalid council member: {0}")]
    InvalidMember(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_too_small_display() {
        let error = DomainError::RosterTooSmall(1);
        assert_eq!(
            error.to_string(),
            "Council needs at least 2 members for ring review, got 1"
        );
    }
}
