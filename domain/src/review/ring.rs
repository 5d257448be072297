//! Reviewer → reviewee assignment and review prompt planning.

use crate::core::member::{Member, Roster};
use crate::orchestration::value_objects::Opinion;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};

/// `reviewer` critiques `reviewee`'s opinion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewAssignment {
    pub reviewer: String,
    pub reviewee: String,
}

/// A planned review call: who reviews whom, and the prompt to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub assignment: ReviewAssignment,
    /// The reviewing member (carries the endpoint to call)
    pub reviewer: Member,
    pub prompt: String,
}

/// Compute the ring: position `i` reviews position `(i + 1) mod N`.
///
/// Pure function of roster order.
pub fn ring_assignments(roster: &Roster) -> Vec<ReviewAssignment> {
    let members = roster.members();
    let n = members.len();
    members
        .iter()
        .enumerate()
        .map(|(i, reviewer)| ReviewAssignment {
            reviewer: reviewer.name.clone(),
            reviewee: members[(i + 1) % n].name.clone(),
        })
        .collect()
}

/// Build one review request per roster member, in roster order.
///
/// The reviewee's opinion text is embedded verbatim, including failure
/// markers such as `Offline: ...`; a reviewer asked to critique an offline
/// peer simply says so.
pub fn plan_reviews(roster: &Roster, opinions: &[Opinion]) -> Vec<ReviewRequest> {
    ring_assignments(roster)
        .into_iter()
        .zip(roster.iter())
        .map(|(assignment, reviewer)| {
            let peer_answer = opinions
                .iter()
                .find(|o| o.member == assignment.reviewee)
                .map(|o| o.result.response_text())
                .unwrap_or_else(|| "Offline: no opinion recorded".to_string());
            ReviewRequest {
                prompt: PromptTemplate::review_prompt(&peer_answer),
                reviewer: reviewer.clone(),
                assignment,
            }
        })
        .collect()
}
