//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! A **council** is an ordered roster of peer inference backends plus one
//! **chairman**. A **session** answers one query in three stages:
//!
//! 1. **Opinions** - every member answers the raw query
//! 2. **Ring review** - member `i` critiques member `(i + 1) mod N`, opening
//!    with `Rating: X/10`
//! 3. **Synthesis** - the chairman merges opinions and reviews into one answer
//!
//! Backend failures are values ([`InferenceOutcome::Failure`]), so a session
//! always produces one opinion and one review per member and exactly one
//! final answer.

pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod review;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::{
    error::DomainError,
    member::{Chairman, Endpoint, Member, Roster},
    model::Model,
    question::Question,
};
pub use orchestration::{
    entities::{Council, Phase},
    report::{OrderedEntries, ResponseReport, ReviewReport, SessionReport},
    value_objects::{
        FailureKind, InferenceOutcome, InferenceResult, Opinion, Review, SessionResult,
        round_secs,
    },
};
pub use prompt::PromptTemplate;
pub use review::{ReviewAssignment, ReviewRequest, Score, extract_score, plan_reviews, ring_assignments};
