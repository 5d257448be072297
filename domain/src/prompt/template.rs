//! Prompt templates for the council flow

use crate::review::parsing::RATING_LABEL;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Review prompt: critique one peer answer, leading with a rating line.
    ///
    /// The answer is embedded verbatim between quotes.
    pub fn review_prompt(peer_answer: &str) -> String {
        format!(
            "Critique this answer: '{}'. \
             Your first line MUST be: '{} X/10'. Then explain why.",
            peer_answer, RATING_LABEL
        )
    }

    /// Chairman prompt: query, every opinion and every review, in roster order
    pub fn synthesis_prompt(
        question: &str,
        opinions: &[(&str, String)],
        reviews: &[(&str, String)],
    ) -> String {
        let opinion_ctx = opinions
            .iter()
            .map(|(name, text)| format!("{}: {}", name, text))
            .collect::<Vec<_>>()
            .join("\n\n");

        let review_ctx = reviews
            .iter()
            .map(|(reviewer, text)| format!("Review from {}: {}", reviewer, text))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "You are the Council Chairman. Synthesize the following research.\n\n\
             Query: {}\n\n\
             Opinions:\n{}\n\n\
             Reviews:\n{}\n\n\
             Provide a final, authoritative response.",
            question, opinion_ctx, review_ctx
        )
    }
}
