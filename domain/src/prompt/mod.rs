//! Prompt domain
//!
//! Templates for the review and synthesis stages. Phase 1 sends the raw
//! user query unmodified.

mod template;

pub use template::PromptTemplate;
