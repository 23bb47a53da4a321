//! Relevance scoring of correction candidates.
use crate::types::{Frequency, Score};

/// Rates a dictionary word as a correction of a query.
///
/// `distance` is the edit distance between both words and `frequency` the
/// occurrence counter of `candidate`. Higher scores rank first.
pub trait Scorer: Send + Sync {
    fn score(&self, query: &str, candidate: &str, distance: usize, frequency: Frequency) -> Score;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str, usize, Frequency) -> Score + Send + Sync,
{
    #[inline(always)]
    fn score(&self, query: &str, candidate: &str, distance: usize, frequency: Frequency) -> Score {
        self(query, candidate, distance, frequency)
    }
}

/// Favours close, frequent words that keep the query's first letters.
///
/// `1 / (1 + distance²) × ln(1 + frequency)`, multiplied by 1.5 when the
/// first letters match and by 1.5 again when the second ones match too.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScorer;

const PREFIX_BONUS: Score = 1.5;

impl Scorer for DefaultScorer {
    fn score(&self, query: &str, candidate: &str, distance: usize, frequency: Frequency) -> Score {
        let mut mult = (frequency as Score).ln_1p();

        let mut q = query.chars();
        let mut c = candidate.chars();
        if let (Some(a), Some(b)) = (q.next(), c.next()) {
            if a == b {
                mult *= PREFIX_BONUS;
                if let (Some(a), Some(b)) = (q.next(), c.next()) {
                    if a == b {
                        mult *= PREFIX_BONUS;
                    }
                }
            }
        }

        let distance = distance as Score;
        mult / (1.0 + distance * distance)
    }
}
