/// Usable bits of a signature. The top bit of the backing `u64` stays clear.
pub const MAX_SIGNATURE_BITS: usize = 63;

/// Default error budget of the fuzzy search.
pub const DEFAULT_MAX_ERRORS: usize = 2;

/// Default number of suggestions handed out.
pub const DEFAULT_N_BEST: usize = 10;

pub const DEFAULT_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Number of bit-flip rounds of the candidate expansion.
pub const EXPANSION_ROUNDS: usize = 2;

/// Words handed to a single write-locked batch by `add_from`.
pub const ADD_BATCH_SIZE: usize = 1000;
