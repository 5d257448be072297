//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A query to be answered by the council (Value Object)
///
/// The text is passed verbatim to every member as its phase-1 prompt and
/// embedded in the chairman's synthesis prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting empty or whitespace-only content
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::parse("Why is the sky blue?").unwrap();
        assert_eq!(q.content(), "Why is the sky blue?");
    }

    #[test]
    fn test_empty_question_rejected() {
        assert!(matches!(
            Question::parse(""),
            Err(DomainError::InvalidQuestion(_))
        ));
    }

    #[test]
    fn test_whitespace_question_rejected() {
        assert!(Question::parse("   \n\t").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<Question, _> = serde_json::from_str("\"hello\"");
        assert!(ok.is_ok());
        let err: Result<Question, _> = serde_json::from_str("\"  \"");
        assert!(err.is_err());
    }
}
