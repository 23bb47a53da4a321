use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::Signature;
use crate::constants::{DEFAULT_LETTERS, MAX_SIGNATURE_BITS};

/// Errors raised while building an [`Alphabet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AlphabetError {
    /// No letters were given
    #[error("unable to use an empty string as alphabet")]
    Empty,

    /// The same letter appears twice
    #[error("duplicate symbol {0:?} at position {1}")]
    DuplicateSymbol(char, usize),

    /// The alphabet needs more signature bits than available
    #[error("alphabets wider than {} bits are not supported, got {0}", MAX_SIGNATURE_BITS)]
    TooWide(usize),
}

/// Letters of an alphabet and the number of bits used to encode them.
///
/// When `length` is smaller than the number of letters, letters wrap
/// around and several of them share one bit. That shrinks the index but
/// lets more unrelated words collide. A `length` of zero gives every letter
/// its own bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetConfig {
    pub letters: String,
    pub length: usize,
}

impl AlphabetConfig {
    pub fn new(letters: impl Into<String>, length: usize) -> AlphabetConfig {
        AlphabetConfig {
            letters: letters.into(),
            length,
        }
    }
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        AlphabetConfig::new(DEFAULT_LETTERS, DEFAULT_LETTERS.len())
    }
}

/// Maps letters to signature bits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AlphabetConfig", into = "AlphabetConfig")]
pub struct Alphabet {
    config: AlphabetConfig,
    symbol_to_bit: HashMap<char, u32>,
    size: usize,
}

impl Alphabet {
    pub fn new(letters: &str, length: usize) -> Result<Alphabet, AlphabetError> {
        let symbol_count = letters.chars().count();
        if symbol_count == 0 {
            return Err(AlphabetError::Empty);
        }

        let width = if length == 0 { symbol_count } else { length };
        if width > MAX_SIGNATURE_BITS {
            return Err(AlphabetError::TooWide(width));
        }

        let mut symbol_to_bit = HashMap::with_capacity(symbol_count);
        for (position, symbol) in letters.chars().enumerate() {
            if symbol_to_bit.contains_key(&symbol) {
                return Err(AlphabetError::DuplicateSymbol(symbol, position));
            }
            symbol_to_bit.insert(symbol, (position % width) as u32);
        }

        Ok(Alphabet {
            config: AlphabetConfig::new(letters, length),
            symbol_to_bit,
            size: symbol_count.min(width),
        })
    }

    #[inline(always)]
    pub fn from_config(config: &AlphabetConfig) -> Result<Alphabet, AlphabetError> {
        Alphabet::new(&config.letters, config.length)
    }

    /// Signature of `word`. Letters outside the alphabet are skipped.
    pub fn encode(&self, word: &str) -> Signature {
        let mut signature = Signature::EMPTY;
        for ch in word.chars() {
            if let Some(&bit) = self.symbol_to_bit.get(&ch) {
                signature.set(bit);
            }
        }
        signature
    }

    /// Bit of a single letter, if it belongs to the alphabet.
    #[inline(always)]
    pub fn bit(&self, symbol: char) -> Option<u32> {
        self.symbol_to_bit.get(&symbol).copied()
    }

    /// Number of distinct bit positions in use.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of letters.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbol_to_bit.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbol_to_bit.is_empty()
    }

    #[inline(always)]
    pub fn config(&self) -> &AlphabetConfig {
        &self.config
    }
}

impl TryFrom<AlphabetConfig> for Alphabet {
    type Error = AlphabetError;

    fn try_from(config: AlphabetConfig) -> Result<Self, Self::Error> {
        Alphabet::from_config(&config)
    }
}

impl From<Alphabet> for AlphabetConfig {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.config
    }
}
