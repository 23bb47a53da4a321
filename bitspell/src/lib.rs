/*! Spell-checking and correction over a signature index.

Every word is reduced to an alphabet signature: one bit per letter class,
set when the word contains a letter of that class. Words sharing a
signature share a bucket of the index. Corrections for an unknown word
come from its own bucket and from buckets one or two bit-flips away,
filtered by edit distance and ranked by a pluggable [`Scorer`].

# Usage examples

```
use bitspell::{Spellchecker, SpellerConfig};

let speller = Spellchecker::new(SpellerConfig::default()).unwrap();
speller.add(["orange", "orange", "range", "problem"]).unwrap();

assert!(speller.is_correct("range"));
assert_eq!(speller.fix("oragne").unwrap(), "orange");
assert_eq!(speller.suggest("problam", 3).unwrap(), vec!["problem"]);
```

A dictionary can be written with [`Spellchecker::save`] and read back
with [`Spellchecker::load`]. Further examples are in the `bitspell-bin`
crate in the same repository.

[`Scorer`]: speller::scorer::Scorer
*/

pub mod dictionary;
pub mod index;
pub mod speller;
pub mod tokenizer;
pub mod types;

pub(crate) mod constants;

pub use crate::speller::error::SpellerError;
pub use crate::speller::{Spellchecker, SpellerConfig};
