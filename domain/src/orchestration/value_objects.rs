//! Orchestration value objects - immutable result types for council sessions.
//!
//! - [`InferenceResult`] - outcome of one backend call, success or failure
//! - [`Opinion`] - a member's phase-1 answer
//! - [`Review`] - a member's critique of its ring successor, with rating
//! - [`SessionResult`] - everything one session produced

use crate::core::model::Model;
use crate::core::question::Question;
use crate::review::parsing::Score;
use crate::review::ring::ReviewAssignment;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why a backend call produced no usable text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Unreachable, connection reset, non-success status, unreadable body
    Offline,
    /// The per-call upper bound elapsed
    Timeout,
    /// Transport succeeded but the reply text was empty or whitespace
    Empty,
}

/// Tagged outcome of a single backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    Success { text: String },
    Failure { kind: FailureKind, detail: String },
}

/// Result of one call to one member or the chairman
///
/// Produced once, never mutated. Failures are ordinary values so that no
/// stage above the inference client needs an error path.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    /// Role label (member name, `Reviewer:<name>`, `CHAIRMAN`)
    pub label: String,
    pub model: Model,
    pub outcome: InferenceOutcome,
    /// Wall-clock time of the call; zero for transport failures
    pub latency: Duration,
}

impl InferenceResult {
    /// Marker text for replies that arrived empty
    pub const EMPTY_MARKER: &'static str = "Error: Empty response.";

    pub fn success(
        label: impl Into<String>,
        model: Model,
        text: impl Into<String>,
        latency: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            model,
            outcome: InferenceOutcome::Success { text: text.into() },
            latency,
        }
    }

    pub fn failure(
        label: impl Into<String>,
        model: Model,
        kind: FailureKind,
        detail: impl Into<String>,
        latency: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            model,
            outcome: InferenceOutcome::Failure {
                kind,
                detail: detail.into(),
            },
            latency,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, InferenceOutcome::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            InferenceOutcome::Success { .. } => None,
            InferenceOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn error_detail(&self) -> Option<&str> {
        match &self.outcome {
            InferenceOutcome::Success { .. } => None,
            InferenceOutcome::Failure { detail, .. } => Some(detail),
        }
    }

    /// Text as seen by downstream prompts and the caller.
    ///
    /// Failures render as human-readable markers (`Offline: <cause>`,
    /// `Error: Empty response.`) so a degraded opinion can still be
    /// reviewed and synthesized like any other text.
    pub fn response_text(&self) -> String {
        match &self.outcome {
            InferenceOutcome::Success { text } => text.clone(),
            InferenceOutcome::Failure {
                kind: FailureKind::Empty,
                ..
            } => Self::EMPTY_MARKER.to_string(),
            InferenceOutcome::Failure { detail, .. } => format!("Offline: {}", detail),
        }
    }

    /// Latency in seconds rounded to two decimals
    pub fn latency_secs(&self) -> f64 {
        round_secs(self.latency)
    }
}

/// Round a duration to seconds with two decimals
pub fn round_secs(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 100.0).round() / 100.0
}

/// A member's phase-1 answer
#[derive(Debug, Clone, PartialEq)]
pub struct Opinion {
    pub member: String,
    pub result: InferenceResult,
}

impl Opinion {
    pub fn new(member: impl Into<String>, result: InferenceResult) -> Self {
        Self {
            member: member.into(),
            result,
        }
    }
}

/// A member's critique of its ring successor's opinion
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub assignment: ReviewAssignment,
    pub critique: InferenceResult,
    pub score: Score,
}

impl Review {
    pub fn reviewer(&self) -> &str {
        &self.assignment.reviewer
    }

    pub fn reviewee(&self) -> &str {
        &self.assignment.reviewee
    }
}

/// Complete result of one council session
///
/// Opinions and reviews are in roster order with exactly one entry per
/// member, regardless of how many backend calls failed.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub question: Question,
    pub opinions: Vec<Opinion>,
    pub reviews: Vec<Review>,
    pub synthesis: InferenceResult,
    pub total_duration: Duration,
}

impl SessionResult {
    pub fn opinion(&self, member: &str) -> Option<&Opinion> {
        self.opinions.iter().find(|o| o.member == member)
    }

    pub fn review_by(&self, reviewer: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.reviewer() == reviewer)
    }

    /// Number of backend calls (all phases) that failed
    pub fn failed_calls(&self) -> usize {
        self.opinions.iter().filter(|o| o.result.is_failed()).count()
            + self.reviews.iter().filter(|r| r.critique.is_failed()).count()
            + usize::from(self.synthesis.is_failed())
    }

    /// True if any call failed or any review went unscored
    pub fn is_degraded(&self) -> bool {
        self.failed_calls() > 0 || self.reviews.iter().any(|r| !r.score.is_rated())
    }

    /// Mean of the parsable review scores, if any
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<u32> = self.reviews.iter().filter_map(|r| r.score.value()).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
    }

    pub fn total_secs(&self) -> f64 {
        round_secs(self.total_duration)
    }
}
