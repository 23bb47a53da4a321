use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifier of a word record. Zero is reserved for "not found".
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct WordId(pub(crate) u32);

impl WordId {
    /// The "not found" identifier.
    pub const NONE: Self = WordId(0);

    /// Wraps a raw identifier.
    #[inline(always)]
    pub const fn new(raw: u32) -> Self {
        WordId(raw)
    }

    /// The raw numeric value.
    #[inline(always)]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Whether this is a real, allocated identifier.
    #[inline(always)]
    pub const fn is_some(&self) -> bool {
        self.0 > 0
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Occurrence counter of a word.
pub type Frequency = u64;

/// Relevance of a suggestion; higher is better.
pub type Score = f64;
