//! Binary encoding of a [`Dictionary`].
use bincode::Options;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Dictionary, IdSequence, WordRecord};
use crate::index::{Alphabet, Index};
use crate::types::{Frequency, WordId};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PersistError {
    /// Reading or writing the underlying stream failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The dictionary could not be encoded
    #[error("failed to encode dictionary: {0}")]
    Encode(#[source] bincode::Error),

    /// The payload is not a serialized dictionary
    #[error("failed to decode dictionary: {0}")]
    Decode(#[source] bincode::Error),

    /// The payload decoded but its records and index disagree
    #[error("corrupt dictionary: {0}")]
    Corrupt(String),
}

#[derive(Serialize)]
struct RecordRef<'a> {
    id: WordId,
    text: &'a str,
    frequency: Frequency,
}

#[derive(Serialize)]
struct DictDataRef<'a> {
    alphabet: &'a Alphabet,
    max_errors: u64,
    last_id: WordId,
    records: Vec<RecordRef<'a>>,
    index: &'a Index,
}

#[derive(Deserialize)]
struct Record {
    id: WordId,
    text: SmolStr,
    frequency: Frequency,
}

#[derive(Deserialize)]
struct DictData {
    alphabet: Alphabet,
    max_errors: u64,
    #[allow(dead_code)]
    last_id: WordId,
    records: Vec<Record>,
    index: Index,
}

#[inline(always)]
fn options() -> impl Options {
    bincode::DefaultOptions::new()
}

impl Dictionary {
    /// Serializes the alphabet, error budget, ID counter, every word record
    /// and the index.
    pub fn marshal(&self) -> Result<Vec<u8>, PersistError> {
        let mut records: Vec<RecordRef<'_>> = self
            .words
            .iter()
            .map(|(id, r)| RecordRef {
                id: *id,
                text: &r.text,
                frequency: r.frequency,
            })
            .collect();
        records.sort_unstable_by_key(|r| r.id);

        let data = DictDataRef {
            alphabet: &self.alphabet,
            max_errors: self.max_errors as u64,
            last_id: self.sequence.last(),
            records,
            index: &self.index,
        };

        let bytes = options().serialize(&data).map_err(PersistError::Encode)?;
        log::debug!(
            "marshalled {} words in {} buckets into {} bytes",
            self.words.len(),
            self.index.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Rebuilds a dictionary from [`Dictionary::marshal`] output.
    ///
    /// The ID sequence resumes one past the highest stored ID.
    pub fn unmarshal(bytes: &[u8]) -> Result<Dictionary, PersistError> {
        let data: DictData = options()
            .with_limit(bytes.len() as u64)
            .reject_trailing_bytes()
            .deserialize(bytes)
            .map_err(PersistError::Decode)?;

        let mut ids = HashMap::with_capacity(data.records.len());
        let mut words = HashMap::with_capacity(data.records.len());
        let mut max_id = WordId::NONE;

        for record in data.records {
            if !record.id.is_some() {
                return Err(PersistError::Corrupt(format!(
                    "word {:?} has a zero id",
                    record.text
                )));
            }
            if words.contains_key(&record.id) {
                return Err(PersistError::Corrupt(format!("duplicate id {}", record.id)));
            }
            if ids.insert(record.text.clone(), record.id).is_some() {
                return Err(PersistError::Corrupt(format!(
                    "duplicate word {:?}",
                    record.text
                )));
            }

            max_id = max_id.max(record.id);
            words.insert(
                record.id,
                WordRecord {
                    text: record.text,
                    frequency: record.frequency,
                },
            );
        }

        let mut indexed = HashSet::with_capacity(words.len());
        for (signature, bucket) in data.index.iter() {
            for id in bucket {
                let record: &WordRecord = match words.get(id) {
                    Some(v) => v,
                    None => {
                        return Err(PersistError::Corrupt(format!(
                            "index references unknown id {}",
                            id
                        )))
                    }
                };
                if data.alphabet.encode(&record.text) != signature {
                    return Err(PersistError::Corrupt(format!(
                        "word {:?} is indexed under {:?}",
                        record.text, signature
                    )));
                }
                if !indexed.insert(*id) {
                    return Err(PersistError::Corrupt(format!("id {} indexed twice", id)));
                }
            }
        }
        if indexed.len() != words.len() {
            return Err(PersistError::Corrupt(format!(
                "{} of {} words are missing from the index",
                words.len() - indexed.len(),
                words.len()
            )));
        }

        log::debug!(
            "unmarshalled {} words in {} buckets",
            words.len(),
            data.index.len()
        );

        Ok(Dictionary {
            alphabet: data.alphabet,
            max_errors: data.max_errors as usize,
            sequence: IdSequence::starting_after(max_id),
            ids,
            words,
            index: data.index,
        })
    }
}
