//! Signature-keyed inverted index of words.
mod alphabet;
pub mod expand;
mod signature;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub use self::alphabet::{Alphabet, AlphabetConfig, AlphabetError};
pub use self::expand::CandidateExpander;
pub use self::signature::Signature;
use crate::types::WordId;

/// Buckets of word IDs sharing a signature. Buckets only grow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    buckets: HashMap<Signature, Vec<WordId>>,
}

impl Index {
    pub fn new() -> Index {
        Index::default()
    }

    /// IDs stored under `signature`, in insertion order.
    #[inline(always)]
    pub fn get(&self, signature: Signature) -> &[WordId] {
        self.buckets
            .get(&signature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a non-empty bucket exists for `signature`.
    #[inline(always)]
    pub fn contains(&self, signature: Signature) -> bool {
        !self.get(signature).is_empty()
    }

    #[inline(always)]
    pub fn insert(&mut self, signature: Signature, id: WordId) {
        self.buckets.entry(signature).or_default().push(id);
    }

    /// Number of buckets.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Signature, &[WordId])> {
        self.buckets.iter().map(|(s, ids)| (*s, ids.as_slice()))
    }
}
