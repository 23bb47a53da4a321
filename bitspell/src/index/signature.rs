use std::fmt;

use serde::{Deserialize, Serialize};

/// Set of alphabet bits present in a word.
///
/// Order and repetition of symbols are lost, so anagrams share a
/// signature. Bit indices past the backing integer are ignored.
#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Signature(u64);

impl Signature {
    pub const EMPTY: Self = Signature(0);

    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Signature(bits)
    }

    #[inline(always)]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    #[inline(always)]
    fn mask(bit: u32) -> u64 {
        1u64.checked_shl(bit).unwrap_or(0)
    }

    #[inline(always)]
    pub fn set(&mut self, bit: u32) {
        self.0 |= Self::mask(bit);
    }

    #[inline(always)]
    pub fn clear(&mut self, bit: u32) {
        self.0 &= !Self::mask(bit);
    }

    #[inline(always)]
    pub fn flip(&mut self, bit: u32) {
        self.0 ^= Self::mask(bit);
    }

    /// Copy of `self` with one bit inverted.
    #[inline(always)]
    pub fn flipped(&self, bit: u32) -> Self {
        let mut out = *self;
        out.flip(bit);
        out
    }

    #[inline(always)]
    pub fn has(&self, bit: u32) -> bool {
        self.0 & Self::mask(bit) != 0
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Hamming distance between two signatures.
    #[inline(always)]
    pub fn count_diff(&self, other: Signature) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#b})", self.0)
    }
}
