//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - backend model tag (e.g. `llama3.2:3b`)
//! - [`member::Member`] / [`member::Roster`] / [`member::Chairman`] - who sits on the council
//! - [`question::Question`] - a validated query to pose to the council
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod member;
pub mod model;
pub mod question;
pub mod string;
