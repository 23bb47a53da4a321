//! Bounded bit-flip exploration of signatures around a query.
use hashbrown::HashSet;

use super::{Index, Signature};
use crate::constants::EXPANSION_ROUNDS;

/// Finds index buckets near a query signature.
///
/// Each round flips every bit in `0..width` of every signature reached by
/// the previous round. Two rounds reach every signature within Hamming
/// distance 2 inside the alphabet's bits. A flip that undoes the previous
/// one lands on an already visited signature and is skipped.
pub struct CandidateExpander<'a> {
    index: &'a Index,
    width: u32,
    rounds: usize,
}

impl<'a> CandidateExpander<'a> {
    pub fn new(index: &'a Index, width: usize) -> CandidateExpander<'a> {
        CandidateExpander {
            index,
            width: width as u32,
            rounds: EXPANSION_ROUNDS,
        }
    }

    /// Signatures with non-empty buckets reachable from `source`, in
    /// discovery order. `source` itself is never part of the result.
    pub fn expand(&self, source: Signature) -> Vec<Signature> {
        let width = self.width as usize;
        let mut visited: HashSet<Signature> = HashSet::with_capacity(width * width + 1);
        visited.insert(source);

        let mut found = Vec::new();
        let mut frontier = vec![source];

        for _ in 0..self.rounds {
            let mut next = Vec::with_capacity(frontier.len() * width);

            for signature in frontier.iter() {
                for bit in 0..self.width {
                    let candidate = signature.flipped(bit);
                    if !visited.insert(candidate) {
                        continue;
                    }

                    if self.index.contains(candidate) {
                        found.push(candidate);
                    }
                    next.push(candidate);
                }
            }

            frontier = next;
        }

        log::trace!(
            "expanded {:?}: visited {} signatures, {} with buckets",
            source,
            visited.len(),
            found.len()
        );

        found
    }
}
