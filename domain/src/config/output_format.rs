//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for council session results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// All three stages: opinions, reviews with scores, final answer
    Full,
    /// Only the chairman's final answer (default)
    #[default]
    Final,
    /// The JSON envelope, as served over HTTP
    Json,
}
