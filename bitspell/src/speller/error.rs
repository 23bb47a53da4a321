//! Error types for spell-checking operations.

use smol_str::SmolStr;

use crate::dictionary::{DictionaryError, PersistError};
use crate::index::AlphabetError;

/// Errors that can occur while building, querying or persisting a
/// [`crate::Spellchecker`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpellerError {
    /// The configured alphabet is invalid
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),

    /// The dictionary cannot take more words
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// Saving or loading the dictionary failed
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Reading words from an input stream failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No known word is close enough; carries the word as given
    #[error("unknown word: {0}")]
    UnknownWord(SmolStr),
}

impl SpellerError {
    /// Whether this is a lookup miss rather than a fault.
    pub fn is_unknown_word(&self) -> bool {
        matches!(self, SpellerError::UnknownWord(_))
    }

    /// The word of a lookup miss, as it was given.
    pub fn unknown_word(&self) -> Option<&str> {
        match self {
            SpellerError::UnknownWord(word) => Some(word.as_str()),
            _ => None,
        }
    }
}
