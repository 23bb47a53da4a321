//! Fixed-capacity selection of the best scored items.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::types::Score;

struct Entry<T> {
    score: Score,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    #[inline(always)]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.key_cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Keeps the `capacity` highest scored items pushed so far.
///
/// Once full, a pushed item evicts the current minimum when its score is
/// greater than or equal to it, so among equal scores later pushes win.
pub struct TopN<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    capacity: usize,
    pushed: u64,
}

impl<T> TopN<T> {
    pub fn new(capacity: usize) -> TopN<T> {
        TopN {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            pushed: 0,
        }
    }

    pub fn push(&mut self, item: T, score: Score) {
        let entry = Entry {
            score,
            seq: self.pushed,
            item,
        };
        self.pushed += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
            return;
        }

        if let Some(mut min) = self.heap.peek_mut() {
            if score.total_cmp(&min.0.score) != Ordering::Less {
                *min = Reverse(entry);
            }
        }
    }

    /// Lowest retained score.
    pub fn min_score(&self) -> Option<Score> {
        self.heap.peek().map(|e| e.0.score)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained items, highest score first.
    pub fn into_sorted_vec(self) -> Vec<(T, Score)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(e)| (e.item, e.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items<T>(top: TopN<T>) -> Vec<T> {
        top.into_sorted_vec().into_iter().map(|(i, _)| i).collect()
    }

    #[test]
    fn keeps_everything_below_capacity() {
        let mut top = TopN::new(5);
        top.push("a", 1.0);
        top.push("b", 3.0);
        top.push("c", 2.0);
        assert_eq!(top.len(), 3);
        assert_eq!(items(top), vec!["b", "c", "a"]);
    }

    #[test]
    fn keeps_highest_scores() {
        let mut top = TopN::new(3);
        for (i, score) in [5.0, 1.0, 9.0, 3.0, 7.0, 2.0, 8.0].iter().enumerate() {
            top.push(i, *score);
            assert!(top.len() <= 3);
        }
        assert_eq!(top.min_score(), Some(7.0));
        assert_eq!(items(top), vec![2, 6, 4]);
    }

    #[test]
    fn ties_favour_later_pushes() {
        let mut top = TopN::new(2);
        top.push("first", 1.0);
        top.push("second", 1.0);
        top.push("third", 1.0);
        assert_eq!(items(top), vec!["third", "second"]);

        let mut top = TopN::new(2);
        top.push("high", 2.0);
        top.push("old", 1.0);
        top.push("new", 1.0);
        top.push("low", 0.5);
        assert_eq!(items(top), vec!["high", "new"]);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut top = TopN::new(0);
        top.push("a", 1.0);
        assert!(top.is_empty());
        assert!(items(top).is_empty());
    }

    #[test]
    fn many_duplicates_do_not_corrupt() {
        let mut top = TopN::new(4);
        for i in 0..100 {
            top.push(i, (i % 3) as Score);
        }
        let out = top.into_sorted_vec();
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|(_, s)| *s == 2.0));
        assert!(out.windows(2).all(|w| w[0].0 > w[1].0));
    }
}
