//! Rating extraction from free-form critiques.
//!
//! Reviewers are told to open with `Rating: X/10`, but backends are not
//! trusted to comply, so the label is searched for anywhere in the text.
//! Absence is a normal outcome ([`Score::Unparsable`]), never an error.

use serde::{Serialize, Serializer};
use std::sync::LazyLock;

/// Label the review prompt asks for and the extractor looks for
pub const RATING_LABEL: &str = "Rating:";

static RATING_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"Rating:\s*([0-9]+)").expect("rating pattern is a valid regex")
});

/// Rating attached to a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Extracted rating, as written by the reviewer
    Rated(u32),
    /// No recognizable rating token in the critique
    Unparsable,
}

impl Score {
    pub fn value(&self) -> Option<u32> {
        match self {
            Score::Rated(v) => Some(*v),
            Score::Unparsable => None,
        }
    }

    pub fn is_rated(&self) -> bool {
        matches!(self, Score::Rated(_))
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Rated(v) => write!(f, "{}", v),
            Score::Unparsable => write!(f, "N/A"),
        }
    }
}

/// Serializes as a bare number, or the string `"N/A"`
impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Score::Rated(v) => serializer.serialize_u32(*v),
            Score::Unparsable => serializer.serialize_str("N/A"),
        }
    }
}

/// Extract the first `Rating: <digits>` in the critique (case-sensitive).
///
/// # Examples
///
/// ```
/// use council_domain::review::parsing::{Score, extract_score};
///
/// assert_eq!(extract_score("Rating: 7/10 because..."), Score::Rated(7));
/// assert_eq!(extract_score("Solid work. Rating: 9/10"), Score::Rated(9));
/// assert_eq!(extract_score("rating: 7/10"), Score::Unparsable);
/// assert_eq!(extract_score("Rating: 85/100"), Score::Rated(85));
/// assert_eq!(extract_score("Rating: seven"), Score::Unparsable);
/// ```
pub fn extract_score(critique: &str) -> Score {
    let Some(digits) = RATING_PATTERN
        .captures(critique)
        .and_then(|caps| caps.get(1))
    else {
        return Score::Unparsable;
    };

    // Only digits matched, so a parse error means overflow
    match digits.as_str().parse::<u32>() {
        Ok(value) => Score::Rated(value),
        Err(_) => Score::Unparsable,
    }
}
