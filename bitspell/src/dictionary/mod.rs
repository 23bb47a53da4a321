//! Word storage, frequency counters and candidate search.
mod persist;
mod sequence;

use hashbrown::HashMap;
use smol_str::SmolStr;

pub use self::persist::PersistError;
pub use self::sequence::IdSequence;
use crate::index::{Alphabet, CandidateExpander, Index, Signature};
use crate::speller::scorer::Scorer;
use crate::speller::suggestion::Suggestion;
use crate::speller::top_n::TopN;
use crate::types::{Frequency, WordId};

/// Errors raised while growing a [`Dictionary`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DictionaryError {
    /// Every word ID has been handed out
    #[error("no word ids left after {0}")]
    IdsExhausted(WordId),
}

/// A known word and how often it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub text: SmolStr,
    pub frequency: Frequency,
}

/// A dictionary word that survived the distance filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub id: WordId,
    pub word: &'a str,
    pub distance: usize,
    pub frequency: Frequency,
}

/// Known words indexed by alphabet signature.
///
/// The dictionary is not synchronised by itself; shared use goes through
/// [`crate::Spellchecker`], which holds it behind a read/write lock.
#[derive(Debug)]
pub struct Dictionary {
    alphabet: Alphabet,
    max_errors: usize,
    sequence: IdSequence,
    ids: HashMap<SmolStr, WordId>,
    words: HashMap<WordId, WordRecord>,
    index: Index,
}

impl Dictionary {
    pub fn new(alphabet: Alphabet, max_errors: usize) -> Dictionary {
        Dictionary {
            alphabet,
            max_errors,
            sequence: IdSequence::new(),
            ids: HashMap::new(),
            words: HashMap::new(),
            index: Index::new(),
        }
    }

    /// ID of `word`, `WordId::NONE` if unknown.
    #[inline(always)]
    pub fn id(&self, word: &str) -> WordId {
        self.ids.get(word).copied().unwrap_or(WordId::NONE)
    }

    #[inline(always)]
    pub fn has(&self, word: &str) -> bool {
        self.id(word).is_some()
    }

    /// Stores a new word with a frequency of 1.
    ///
    /// Adding a word that is already known returns its existing ID and
    /// changes nothing; use [`Dictionary::inc`] to count repetitions.
    pub fn add(&mut self, word: &str) -> Result<WordId, DictionaryError> {
        if let Some(&id) = self.ids.get(word) {
            return Ok(id);
        }

        let id = match self.sequence.next() {
            Some(id) => id,
            None => return Err(DictionaryError::IdsExhausted(self.sequence.last())),
        };
        let text = SmolStr::from(word);
        let signature = self.alphabet.encode(word);

        self.ids.insert(text.clone(), id);
        self.words.insert(id, WordRecord { text, frequency: 1 });
        self.index.insert(signature, id);

        Ok(id)
    }

    /// Increments the frequency of `id`. Unknown IDs are ignored.
    pub fn inc(&mut self, id: WordId) {
        if let Some(record) = self.words.get_mut(&id) {
            record.frequency = record.frequency.saturating_add(1);
        }
    }

    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(&id).map(|r| r.text.as_str())
    }

    pub fn frequency(&self, id: WordId) -> Option<Frequency> {
        self.words.get(&id).map(|r| r.frequency)
    }

    pub fn record(&self, id: WordId) -> Option<&WordRecord> {
        self.words.get(&id)
    }

    /// Number of known words.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline(always)]
    pub fn index(&self) -> &Index {
        &self.index
    }

    #[inline(always)]
    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    #[inline(always)]
    pub fn set_max_errors(&mut self, max_errors: usize) {
        self.max_errors = max_errors;
    }

    /// Words within the error budget of `word`.
    ///
    /// The bucket of `word`'s own signature holds exact matches and
    /// anagrams; when any of them is close enough the search ends there.
    /// Otherwise buckets up to two bit-flips away are searched.
    pub fn candidates(&self, word: &str) -> Vec<Candidate<'_>> {
        let source = self.alphabet.encode(word);
        let mut out = Vec::new();

        self.collect_bucket(word, source, &mut out);
        if !out.is_empty() {
            log::trace!("{:?}: {} candidates in own bucket", word, out.len());
            return out;
        }

        let expander = CandidateExpander::new(&self.index, self.alphabet.size());
        for signature in expander.expand(source) {
            self.collect_bucket(word, signature, &mut out);
        }

        log::trace!("{:?}: {} candidates after expansion", word, out.len());
        out
    }

    fn collect_bucket<'a>(&'a self, word: &str, signature: Signature, out: &mut Vec<Candidate<'a>>) {
        for &id in self.index.get(signature) {
            let record = match self.words.get(&id) {
                Some(v) => v,
                None => continue,
            };

            let distance = strsim::levenshtein(word, &record.text);
            if distance > self.max_errors {
                continue;
            }

            out.push(Candidate {
                id,
                word: &record.text,
                distance,
                frequency: record.frequency,
            });
        }
    }

    /// The `n` best corrections of `word`, best first.
    pub fn find(&self, word: &str, n: usize, scorer: &dyn Scorer) -> Vec<Suggestion> {
        if self.max_errors == 0 || n == 0 {
            return vec![];
        }

        let mut top = TopN::new(n);
        for c in self.candidates(word) {
            let score = scorer.score(word, c.word, c.distance, c.frequency);
            top.push(c.word, score);
        }

        top.into_sorted_vec()
            .into_iter()
            .map(|(value, score)| Suggestion::new(value.into(), score))
            .collect()
    }

    /// Highest ID handed out so far.
    pub(crate) fn last_id(&self) -> WordId {
        self.sequence.last()
    }

    #[cfg(test)]
    pub(crate) fn with_ids_after(mut self, last: WordId) -> Dictionary {
        self.sequence = IdSequence::starting_after(last);
        self
    }
}
