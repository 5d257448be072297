//! Ring peer review domain
//!
//! Each member reviews exactly one peer: the member at position `i`
//! critiques the opinion of the member at `(i + 1) mod N`. For `N >= 2`
//! this forms a single cycle over the roster, so every member is reviewed
//! exactly once and nobody reviews itself.
//!
//! ```text
//!   Council_1 ──reviews──▶ Council_2
//!       ▲                      │
//!       │                   reviews
//!    reviews                   ▼
//!       └────────────── Council_3
//! ```
//!
//! Critiques are asked to open with `Rating: X/10`; [`parsing::extract_score`]
//! recovers that number on a best-effort basis.

pub mod parsing;
pub mod ring;

pub use parsing::{Score, extract_score};
pub use ring::{ReviewAssignment, ReviewRequest, plan_reviews, ring_assignments};
