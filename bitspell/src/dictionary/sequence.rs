use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::WordId;

/// Source of word IDs. Every call to [`IdSequence::next`] yields a fresh
/// ID, including under concurrent use.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: AtomicU32,
}

impl IdSequence {
    /// Sequence whose first ID is 1.
    pub fn new() -> IdSequence {
        IdSequence::starting_after(WordId::NONE)
    }

    /// Sequence resuming one past `last`.
    pub fn starting_after(last: WordId) -> IdSequence {
        IdSequence {
            last: AtomicU32::new(last.get()),
        }
    }

    /// The next ID, or `None` once `u32::MAX` has been handed out.
    #[inline(always)]
    pub fn next(&self) -> Option<WordId> {
        self.last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
            .ok()
            .map(|prev| WordId(prev + 1))
    }

    /// Most recently handed out ID, `WordId::NONE` if none.
    #[inline(always)]
    pub fn last(&self) -> WordId {
        WordId(self.last.load(Ordering::Relaxed))
    }
}
