//! Wire types for the `/api/generate` endpoint

use serde::{Deserialize, Serialize};

pub const GENERATE_PATH: &str = "/api/generate";
pub const TAGS_PATH: &str = "/api/tags";

/// Non-streaming completion request
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
        }
    }
}

/// Completion reply; only the generated text is read
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl GenerateResponse {
    /// Reply text, empty when the field is absent or null
    pub fn into_text(self) -> String {
        self.response.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_non_streaming() {
        let json = serde_json::to_value(GenerateRequest::new("gemma2:2b", "hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "gemma2:2b", "prompt": "hi", "stream": false})
        );
    }

    #[test]
    fn test_missing_response_field_is_empty() {
        let reply: GenerateResponse =
            serde_json::from_str(r#"{"model":"m","done":true}"#).unwrap();
        assert_eq!(reply.into_text(), "");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"model":"m","created_at":"2024-01-01T00:00:00Z","response":"42","done":true,"context":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(reply.into_text(), "42");
    }
}
