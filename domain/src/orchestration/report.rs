//! Session result assembly - the wire envelope returned to callers.
//!
//! ```json
//! {
//!   "opinions": { "<member>": { "response": "...", "latency": 1.23 } },
//!   "reviews":  { "<reviewer>": { "response": "...", "score": 7,
//!                                 "latency": 2.5, "reviewing": "<member>" } },
//!   "final":    { "response": "...", "latency": 4.2 },
//!   "total_time": "12.34s"
//! }
//! ```
//!
//! Mappings are emitted in roster order. Degraded and clean sessions share
//! the same envelope: failures show up as marker text and `"N/A"` scores.

use crate::orchestration::value_objects::{InferenceResult, SessionResult};
use crate::review::parsing::Score;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Name-keyed entries that serialize as a JSON object in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntries<T>(pub Vec<(String, T)>);

impl<T> OrderedEntries<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Serialize> Serialize for OrderedEntries<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One opinion or the final synthesis as seen by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseReport {
    pub response: String,
    pub latency: f64,
}

impl From<&InferenceResult> for ResponseReport {
    fn from(result: &InferenceResult) -> Self {
        Self {
            response: result.response_text(),
            latency: result.latency_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewReport {
    pub response: String,
    pub score: Score,
    pub latency: f64,
    /// Member whose opinion this review critiques
    pub reviewing: String,
}

/// Caller-facing envelope for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub opinions: OrderedEntries<ResponseReport>,
    pub reviews: OrderedEntries<ReviewReport>,
    #[serde(rename = "final")]
    pub final_answer: ResponseReport,
    /// Seconds with two decimals and an `s` suffix, e.g. `"12.34s"`
    pub total_time: String,
}

impl SessionReport {
    /// Shape a session result into the caller-facing envelope
    pub fn assemble(result: &SessionResult) -> Self {
        let opinions = result
            .opinions
            .iter()
            .map(|o| (o.member.clone(), ResponseReport::from(&o.result)))
            .collect();

        let reviews = result
            .reviews
            .iter()
            .map(|r| {
                (
                    r.reviewer().to_string(),
                    ReviewReport {
                        response: r.critique.response_text(),
                        score: r.score,
                        latency: r.critique.latency_secs(),
                        reviewing: r.reviewee().to_string(),
                    },
                )
            })
            .collect();

        Self {
            opinions: OrderedEntries(opinions),
            reviews: OrderedEntries(reviews),
            final_answer: ResponseReport::from(&result.synthesis),
            total_time: format!("{:.2}s", result.total_duration.as_secs_f64()),
        }
    }
}

impl From<&SessionResult> for SessionReport {
    fn from(result: &SessionResult) -> Self {
        Self::assemble(result)
    }
}
