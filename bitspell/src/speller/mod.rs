use std::io::{BufRead, Read, Write};
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use self::error::SpellerError;
use self::scorer::{DefaultScorer, Scorer};
use self::suggestion::Suggestion;
use crate::constants::{ADD_BATCH_SIZE, DEFAULT_MAX_ERRORS, DEFAULT_N_BEST};
use crate::dictionary::{Dictionary, PersistError};
use crate::index::{Alphabet, AlphabetConfig};
use crate::tokenizer::{DefaultSplitter, WordSplitter};

pub mod error;
pub mod scorer;
pub mod suggestion;
pub mod top_n;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellerConfig {
    pub alphabet: AlphabetConfig,
    /// Largest edit distance accepted for a suggestion
    pub max_errors: usize,
    /// Suggestions handed out when no count is given
    pub n_best: usize,
}

impl Default for SpellerConfig {
    fn default() -> Self {
        SpellerConfig {
            alphabet: AlphabetConfig::default(),
            max_errors: DEFAULT_MAX_ERRORS,
            n_best: DEFAULT_N_BEST,
        }
    }
}

/// Thread-safe spellchecker over a [`Dictionary`].
///
/// Lookups share a read lock and may run in parallel; adding words and
/// changing options take the write lock.
pub struct Spellchecker {
    dict: RwLock<Dictionary>,
    scorer: RwLock<Arc<dyn Scorer>>,
    splitter: Arc<dyn WordSplitter>,
    n_best: usize,
}

impl std::fmt::Debug for Spellchecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dict = self.dict.read();
        f.debug_struct("Spellchecker")
            .field("words", &dict.len())
            .field("max_errors", &dict.max_errors())
            .field("alphabet", dict.alphabet().config())
            .field("n_best", &self.n_best)
            .finish()
    }
}

impl Spellchecker {
    pub fn new(config: SpellerConfig) -> Result<Spellchecker, SpellerError> {
        let alphabet = Alphabet::from_config(&config.alphabet)?;
        let dict = Dictionary::new(alphabet, config.max_errors);
        Ok(Spellchecker::from_dictionary(dict, config.n_best))
    }

    fn from_dictionary(dict: Dictionary, n_best: usize) -> Spellchecker {
        Spellchecker {
            dict: RwLock::new(dict),
            scorer: RwLock::new(Arc::new(DefaultScorer)),
            splitter: Arc::new(DefaultSplitter),
            n_best,
        }
    }

    pub fn with_scorer(self, scorer: impl Scorer + 'static) -> Spellchecker {
        *self.scorer.write() = Arc::new(scorer);
        self
    }

    pub fn with_splitter(mut self, splitter: impl WordSplitter + 'static) -> Spellchecker {
        self.splitter = Arc::new(splitter);
        self
    }

    pub fn with_n_best(mut self, n_best: usize) -> Spellchecker {
        self.n_best = n_best;
        self
    }

    pub fn with_max_errors(self, max_errors: usize) -> Spellchecker {
        self.set_max_errors(max_errors);
        self
    }

    pub fn set_max_errors(&self, max_errors: usize) {
        self.dict.write().set_max_errors(max_errors);
    }

    pub fn set_scorer(&self, scorer: impl Scorer + 'static) {
        *self.scorer.write() = Arc::new(scorer);
    }

    pub fn max_errors(&self) -> usize {
        self.dict.read().max_errors()
    }

    pub fn n_best(&self) -> usize {
        self.n_best
    }

    /// Current configuration, as it would be passed to [`Spellchecker::new`].
    pub fn config(&self) -> SpellerConfig {
        let dict = self.dict.read();
        SpellerConfig {
            alphabet: dict.alphabet().config().clone(),
            max_errors: dict.max_errors(),
            n_best: self.n_best,
        }
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.dict.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.read().is_empty()
    }

    /// Adds words, counting repetitions of known ones. Empty words are
    /// skipped.
    ///
    /// Fails once the dictionary runs out of word IDs; words before the
    /// failing one stay added.
    pub fn add<I, S>(&self, words: I) -> Result<(), SpellerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = self.dict.write();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }

            let id = dict.id(word);
            if id.is_some() {
                dict.inc(id);
            } else {
                dict.add(word)?;
            }
        }
        Ok(())
    }

    /// Splits `input` line by line with the configured splitter and adds
    /// the words in batches. Invalid UTF-8 is replaced, not rejected.
    pub fn add_from<R: BufRead>(&self, input: R) -> Result<(), SpellerError> {
        let splitter = Arc::clone(&self.splitter);
        let mut total = 0usize;
        let mut error = None;

        let words = input
            .split(b'\n')
            .map_while(|line| match line {
                Ok(bytes) => Some(splitter.split(&String::from_utf8_lossy(&bytes))),
                Err(e) => {
                    error = Some(e);
                    None
                }
            })
            .flatten();

        for batch in &words.chunks(ADD_BATCH_SIZE) {
            let batch: Vec<SmolStr> = batch.collect();
            total += batch.len();
            self.add(batch.iter().map(SmolStr::as_str))?;
        }

        if let Some(e) = error {
            return Err(e.into());
        }

        log::debug!("added {} words from input", total);
        Ok(())
    }

    /// Whether `word` is in the dictionary.
    pub fn is_correct(&self, word: &str) -> bool {
        self.dict.read().has(word)
    }

    /// Best correction of `word`, or `word` itself when it is known.
    pub fn fix(&self, word: &str) -> Result<SmolStr, SpellerError> {
        let mut found = self.suggest(word, 1)?;
        match found.pop() {
            Some(v) => Ok(v),
            None => Err(SpellerError::UnknownWord(word.into())),
        }
    }

    /// Up to `n` corrections of `word`, best first. A known word is its own
    /// single suggestion.
    pub fn suggest(&self, word: &str, n: usize) -> Result<Vec<SmolStr>, SpellerError> {
        let dict = self.dict.read();
        if dict.has(word) {
            return Ok(vec![word.into()]);
        }

        let scorer = Arc::clone(&self.scorer.read());
        let hits = dict.find(word, n, &*scorer);
        if hits.is_empty() {
            return Err(SpellerError::UnknownWord(word.into()));
        }

        Ok(hits.into_iter().map(|s| s.value).collect())
    }

    /// Scored corrections of `word`, at most `n_best` of them. Unlike
    /// [`Spellchecker::suggest`] this searches even when `word` is known.
    pub fn suggestions(&self, word: &str) -> Vec<Suggestion> {
        self.suggestions_n(word, self.n_best)
    }

    /// Like [`Spellchecker::suggestions`], with at most `n` results.
    pub fn suggestions_n(&self, word: &str, n: usize) -> Vec<Suggestion> {
        let dict = self.dict.read();
        let scorer = Arc::clone(&self.scorer.read());
        dict.find(word, n, &*scorer)
    }

    /// Writes the dictionary in its binary form.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<(), SpellerError> {
        let bytes = self.dict.read().marshal()?;
        writer.write_all(&bytes).map_err(PersistError::Io)?;
        writer.flush().map_err(PersistError::Io)?;
        Ok(())
    }

    /// Writes the dictionary to `path` through a temporary file in the same
    /// directory, so `path` is either the old or the new dictionary.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SpellerError> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(PersistError::Io)?;
        self.save(std::io::BufWriter::new(file.as_file_mut()))?;
        file.persist(path)
            .map_err(|e| PersistError::Io(e.error))?;

        log::debug!("saved dictionary to {}", path.display());
        Ok(())
    }

    /// Reads a spellchecker saved by [`Spellchecker::save`].
    ///
    /// Only the dictionary and its error budget are stored. Scorer,
    /// splitter and `n_best` are reset to the defaults; use
    /// [`Spellchecker::with_n_best`] to restore the latter.
    pub fn load<R: Read>(reader: R) -> Result<Spellchecker, SpellerError> {
        let dict = read_dictionary(reader)?;
        Ok(Spellchecker::from_dictionary(dict, DEFAULT_N_BEST))
    }

    pub fn load_from_path(path: &Path) -> Result<Spellchecker, SpellerError> {
        let file = std::fs::File::open(path).map_err(PersistError::Io)?;
        let out = Spellchecker::load(std::io::BufReader::new(file))?;
        log::debug!("loaded {} words from {}", out.len(), path.display());
        Ok(out)
    }

    /// Replaces the dictionary with one read from `reader`. On error the
    /// current dictionary is left untouched.
    pub fn reload<R: Read>(&self, reader: R) -> Result<(), SpellerError> {
        let dict = read_dictionary(reader)?;
        *self.dict.write() = dict;
        Ok(())
    }
}

fn read_dictionary<R: Read>(mut reader: R) -> Result<Dictionary, SpellerError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(PersistError::Io)?;
    Ok(Dictionary::unmarshal(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryError;
    use crate::types::{Frequency, WordId};

    fn english() -> Spellchecker {
        Spellchecker::new(SpellerConfig::default()).unwrap()
    }

    fn add_times(sc: &Spellchecker, word: &str, times: usize) {
        sc.add(std::iter::repeat(word).take(times)).unwrap();
    }

    #[test]
    fn default_config() {
        let config = SpellerConfig::default();
        assert_eq!(config.alphabet, AlphabetConfig::default());
        assert_eq!(config.max_errors, DEFAULT_MAX_ERRORS);
        assert_eq!(config.n_best, DEFAULT_N_BEST);
        assert_eq!(english().config(), config);
    }

    #[test]
    fn rejects_bad_alphabets() {
        let mut config = SpellerConfig::default();
        config.alphabet = AlphabetConfig::new("", 0);
        assert!(matches!(
            Spellchecker::new(config.clone()),
            Err(SpellerError::Alphabet(_))
        ));

        config.alphabet = AlphabetConfig::new("abca", 0);
        assert!(matches!(
            Spellchecker::new(config.clone()),
            Err(SpellerError::Alphabet(_))
        ));

        config.alphabet = AlphabetConfig::new("abc", 64);
        assert!(Spellchecker::new(config).is_err());
    }

    #[test]
    fn add_counts_repetitions() {
        let sc = english();
        sc.add(["tea", "tea", "cup", "", "tea"]).unwrap();
        assert_eq!(sc.len(), 2);

        let dict = sc.dict.read();
        assert_eq!(dict.frequency(dict.id("tea")), Some(3));
        assert_eq!(dict.frequency(dict.id("cup")), Some(1));
        assert!(!dict.has(""));
    }

    #[test]
    fn transposition_is_fixed_from_own_bucket() {
        let sc = english();
        add_times(&sc, "orange", 5);
        add_times(&sc, "range", 1);
        assert_eq!(sc.fix("oragne").unwrap(), "orange");
    }

    #[test]
    fn substitution_is_fixed() {
        let sc = english();
        add_times(&sc, "problem", 10);
        assert_eq!(sc.fix("problam").unwrap(), "problem");
    }

    #[test]
    fn empty_dictionary_knows_nothing() {
        let sc = english();
        assert!(!sc.is_correct("anything"));

        let err = sc.fix("anything").unwrap_err();
        assert!(err.is_unknown_word());
        assert_eq!(err.unknown_word(), Some("anything"));

        let err = sc.suggest("anything", 3).unwrap_err();
        assert_eq!(err.unknown_word(), Some("anything"));
    }

    #[test]
    fn known_word_short_circuits() {
        let sc = english();
        add_times(&sc, "tea", 3);
        add_times(&sc, "sea", 9);
        assert!(sc.is_correct("tea"));
        assert_eq!(sc.suggest("tea", 5).unwrap(), vec!["tea"]);
        assert_eq!(sc.fix("tea").unwrap(), "tea");
    }

    #[test]
    fn neighbours_ranked_by_frequency() {
        let sc = english().with_max_errors(1);
        add_times(&sc, "cat", 2);
        add_times(&sc, "bat", 7);

        assert_eq!(sc.suggest("hat", 5).unwrap(), vec!["bat", "cat"]);

        add_times(&sc, "cat", 10);
        assert_eq!(sc.suggest("hat", 5).unwrap(), vec!["cat", "bat"]);
        assert_eq!(sc.suggest("hat", 1).unwrap(), vec!["cat"]);
    }

    #[test]
    fn error_budget_bounds_distance() {
        let sc = english();
        sc.add(["elephant"]).unwrap();
        assert_eq!(sc.fix("elephamt").unwrap(), "elephant");
        // three signature bits apart, out of reach of two flips
        assert!(sc.fix("elefant").is_err());

        sc.set_max_errors(0);
        assert_eq!(sc.max_errors(), 0);
        assert!(sc.fix("elephamt").unwrap_err().is_unknown_word());
    }

    #[test]
    fn custom_scorer_changes_ranking() {
        let shortest = |_: &str, c: &str, _: usize, _: Frequency| -(c.chars().count() as f64);
        let sc = english().with_scorer(shortest);
        add_times(&sc, "bats", 10);
        sc.add(["bat"]).unwrap();

        assert_eq!(sc.suggest("bas", 2).unwrap(), vec!["bat", "bats"]);

        sc.set_scorer(DefaultScorer);
        assert_eq!(sc.suggest("bas", 2).unwrap(), vec!["bats", "bat"]);
    }

    #[test]
    fn add_from_uses_splitter() {
        let sc = english();
        let text = "The quick brown fox.\nThe lazy DOG, the end!\n";
        sc.add_from(text.as_bytes()).unwrap();

        assert!(sc.is_correct("the"));
        assert!(sc.is_correct("dog"));
        assert!(!sc.is_correct("The"));
        assert_eq!(sc.len(), 7);

        let dict = sc.dict.read();
        assert_eq!(dict.frequency(dict.id("the")), Some(3));
    }

    #[test]
    fn add_from_with_custom_splitter() {
        let by_comma = |s: &str| {
            s.split(',')
                .map(|w| SmolStr::from(w.trim()))
                .collect::<Vec<_>>()
        };
        let sc = english().with_splitter(by_comma);
        sc.add_from("Alpha, beta,gamma\n".as_bytes()).unwrap();
        assert!(sc.is_correct("Alpha"));
        assert!(sc.is_correct("gamma"));
    }

    #[test]
    fn add_from_batches_large_input() {
        let sc = english();
        let text = "word ".repeat(2500);
        sc.add_from(text.as_bytes()).unwrap();
        let dict = sc.dict.read();
        assert_eq!(dict.frequency(dict.id("word")), Some(2500));
    }

    #[test]
    fn add_from_survives_invalid_utf8() {
        let sc = english();
        sc.add_from(&b"hello caf\xe9 world\nlater\n"[..]).unwrap();

        assert!(sc.is_correct("hello"));
        assert!(sc.is_correct("caf"));
        assert!(sc.is_correct("world"));
        assert!(sc.is_correct("later"));
        assert_eq!(sc.len(), 4);
    }

    #[test]
    fn add_fails_when_ids_run_out() {
        let alphabet = Alphabet::from_config(&AlphabetConfig::default()).unwrap();
        let mut dict = Dictionary::new(alphabet, 2).with_ids_after(WordId::new(u32::MAX - 1));
        assert_eq!(dict.add("full").unwrap(), WordId::new(u32::MAX));

        let sc = Spellchecker::from_dictionary(dict, DEFAULT_N_BEST);
        sc.add(["full", "full"]).unwrap();

        let err = sc.add(["fresh"]).unwrap_err();
        assert!(matches!(
            err,
            SpellerError::Dictionary(DictionaryError::IdsExhausted(_))
        ));
        assert!(!sc.is_correct("fresh"));
        assert_eq!(sc.len(), 1);
    }

    #[test]
    fn add_from_passes_io_errors_through() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let sc = english();
        let err = sc.add_from(std::io::BufReader::new(Broken)).unwrap_err();
        assert!(matches!(err, SpellerError::Io(ref e) if e.to_string() == "boom"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let sc = english().with_max_errors(1);
        add_times(&sc, "orange", 5);
        add_times(&sc, "range", 2);
        sc.add(["cat", "bat", "problem"]).unwrap();

        let mut buf = Vec::new();
        sc.save(&mut buf).unwrap();
        let loaded = Spellchecker::load(buf.as_slice()).unwrap();
        assert_eq!(loaded.n_best(), DEFAULT_N_BEST);
        let loaded = loaded.with_n_best(3);
        assert_eq!(loaded.n_best(), 3);
        assert_eq!(loaded.config().n_best, 3);

        assert_eq!(loaded.len(), sc.len());
        assert_eq!(loaded.max_errors(), 1);
        assert_eq!(loaded.config().alphabet, sc.config().alphabet);
        for word in ["oragne", "hat", "problam", "rang"] {
            assert_eq!(
                loaded.suggest(word, 5).ok(),
                sc.suggest(word, 5).ok(),
                "{}",
                word
            );
        }
    }

    #[test]
    fn save_to_path_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let sc = english();
        sc.add(["alpha", "beta"]).unwrap();
        sc.save_to_path(&path).unwrap();

        let loaded = Spellchecker::load_from_path(&path).unwrap();
        assert!(loaded.is_correct("beta"));
        assert_eq!(loaded.fix("alpah").unwrap(), "alpha");
    }

    #[test]
    fn failed_reload_keeps_dictionary() {
        let sc = english();
        sc.add(["keep"]).unwrap();

        assert!(sc.reload(&b"garbage"[..]).is_err());
        assert!(sc.is_correct("keep"));

        let other = english();
        other.add(["replaced"]).unwrap();
        let mut buf = Vec::new();
        other.save(&mut buf).unwrap();

        sc.reload(buf.as_slice()).unwrap();
        assert!(!sc.is_correct("keep"));
        assert!(sc.is_correct("replaced"));
    }

    #[test]
    fn suggestions_are_scored() {
        let sc = english();
        add_times(&sc, "tea", 3);
        let found = sc.suggestions("tea");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value(), "tea");
        assert!(found[0].score() > 0.0);

        sc.add(["eat"]).unwrap();
        assert_eq!(sc.suggestions_n("tea", 2).len(), 2);
        assert!(sc.suggestions_n("tea", 0).is_empty());
    }

    #[test]
    fn concurrent_readers() {
        let sc = Arc::new(english());
        sc.add(["orange", "problem", "cat", "bat"]).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sc = Arc::clone(&sc);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert_eq!(sc.fix("oragne").unwrap(), "orange");
                        assert!(sc.is_correct("cat"));
                        if i == 0 {
                            sc.add(["tea"]).unwrap();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(sc.is_correct("tea"));
    }
}
