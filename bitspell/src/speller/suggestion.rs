//! Suggestion for a spelling correction.
use crate::types::Score;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Suggestion for a spelling correction
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// relevance of the word-form, higher is better
    pub score: Score,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: SmolStr, score: Score) -> Suggestion {
        Suggestion { value, score }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the relevance score of the suggestion
    pub fn score(&self) -> Score {
        self.score
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best suggestion first: descending score, then word-form.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.score.total_cmp(&self.score) {
            Ordering::Equal => self.value.cmp(&other.value),
            x => x,
        }
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.score.to_bits() == other.score.to_bits()
    }
}

impl Eq for Suggestion {}
