//! # Indexed Pair Priority Queue
//!
//! A max-heap over `(Pair, Count)` entries that supports `O(log n)` in-place
//! re-keying by pair, via a side table mapping each live pair to its current
//! heap slot. This is what lets the trainer bump a pair's count without a
//! linear scan: merges touch a handful of pairs per word, and each touch is
//! one `upsert` call.
//!
//! Ties break on the pair itself, ascending: of two pairs with equal count,
//! the lexicographically smaller pair is considered higher priority. This
//! makes training a pure function of (corpus contents, vocab size) rather
//! than an insertion-order artifact.

use crate::types::{CommonHashMap, Count, Pair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    pair: Pair,
    count: Count,
}

/// `entry` outranks `other` if it has a strictly higher count, or an equal
/// count and a lexicographically smaller pair.
fn outranks(
    entry: &Entry,
    other: &Entry,
) -> bool {
    if entry.count != other.count {
        entry.count > other.count
    } else {
        entry.pair < other.pair
    }
}

/// An indexed max-heap over pairs, keyed by occurrence count.
///
/// Supports incremental re-keying (`upsert`) in addition to `extract_top`,
/// so the trainer can apply per-merge deltas directly instead of rebuilding
/// the queue.
#[derive(Debug, Clone, Default)]
pub struct PairHeap {
    heap: Vec<Entry>,
    positions: CommonHashMap<Pair, usize>,
}

impl PairHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: CommonHashMap::default(),
        }
    }

    /// Create an empty heap with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: CommonHashMap::with_capacity(capacity),
        }
    }

    /// Number of live pairs in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Is the heap empty?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Does the heap currently hold `pair`?
    pub fn contains(
        &self,
        pair: Pair,
    ) -> bool {
        self.positions.contains_key(&pair)
    }

    /// The current count for `pair`, if it is live in the heap.
    pub fn count_of(
        &self,
        pair: Pair,
    ) -> Option<Count> {
        self.positions.get(&pair).map(|&idx| self.heap[idx].count)
    }

    /// Return the top `(pair, count)` without removing it.
    pub fn peek(&self) -> Option<(Pair, Count)> {
        self.heap.first().map(|e| (e.pair, e.count))
    }

    /// Remove and return the top `(pair, count)`.
    pub fn extract_top(&mut self) -> Option<(Pair, Count)> {
        if self.heap.is_empty() {
            return None;
        }

        let top = self.heap[0];
        self.positions.remove(&top.pair);

        let last = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.positions.insert(self.heap[0].pair, 0);
            self.bubble_down(0);
        }

        Some((top.pair, top.count))
    }

    /// Apply `delta` to `pair`'s count, inserting it if absent.
    ///
    /// A pair whose count drops to (or below) zero is removed from the
    /// heap entirely: zero-count pairs carry no information and would
    /// otherwise accumulate as dead weight.
    ///
    /// `delta` is a signed adjustment applied to an unsigned count; positive
    /// deltas insert or raise, negative deltas lower or remove.
    pub fn upsert(
        &mut self,
        pair: Pair,
        delta: i64,
    ) {
        if let Some(&idx) = self.positions.get(&pair) {
            let current = self.heap[idx].count as i64;
            let updated = current + delta;

            if updated <= 0 {
                self.remove_at(idx);
                return;
            }

            let old = self.heap[idx];
            self.heap[idx].count = updated as Count;

            if self.heap[idx].count > old.count {
                self.bubble_up(idx);
            } else {
                self.bubble_down(idx);
            }
        } else if delta > 0 {
            let entry = Entry {
                pair,
                count: delta as Count,
            };
            let idx = self.heap.len();
            self.heap.push(entry);
            self.positions.insert(pair, idx);
            self.bubble_up(idx);
        }
    }

    fn remove_at(
        &mut self,
        idx: usize,
    ) {
        self.positions.remove(&self.heap[idx].pair);

        let last_idx = self.heap.len() - 1;
        if idx == last_idx {
            self.heap.pop();
            return;
        }

        let replaced_count = self.heap[idx].count;
        self.heap[idx] = self.heap.pop().unwrap();
        self.positions.insert(self.heap[idx].pair, idx);

        if self.heap[idx].count > replaced_count {
            self.bubble_up(idx);
        } else {
            self.bubble_down(idx);
        }
    }

    fn bubble_up(
        &mut self,
        mut idx: usize,
    ) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if outranks(&self.heap[idx], &self.heap[parent]) {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn bubble_down(
        &mut self,
        mut idx: usize,
    ) {
        let n = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut largest = idx;

            if left < n && outranks(&self.heap[left], &self.heap[largest]) {
                largest = left;
            }
            if right < n && outranks(&self.heap[right], &self.heap[largest]) {
                largest = right;
            }

            if largest == idx {
                break;
            }

            self.swap(idx, largest);
            idx = largest;
        }
    }

    fn swap(
        &mut self,
        a: usize,
        b: usize,
    ) {
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].pair, a);
        self.positions.insert(self.heap[b].pair, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_heap() {
        let mut heap = PairHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_top(), None);
    }

    #[test]
    fn max_is_top() {
        let mut heap = PairHeap::new();
        heap.upsert((1, 2), 3);
        heap.upsert((3, 4), 9);
        heap.upsert((5, 6), 1);

        assert_eq!(heap.extract_top(), Some(((3, 4), 9)));
        assert_eq!(heap.extract_top(), Some(((1, 2), 3)));
        assert_eq!(heap.extract_top(), Some(((5, 6), 1)));
        assert!(heap.is_empty());
    }

    #[test]
    fn ties_break_to_smallest_pair() {
        let mut heap = PairHeap::new();
        heap.upsert((9, 9), 5);
        heap.upsert((1, 1), 5);
        heap.upsert((1, 2), 5);

        assert_eq!(heap.extract_top(), Some(((1, 1), 5)));
        assert_eq!(heap.extract_top(), Some(((1, 2), 5)));
        assert_eq!(heap.extract_top(), Some(((9, 9), 5)));
    }

    #[test]
    fn upsert_reorders_on_increment() {
        let mut heap = PairHeap::new();
        heap.upsert((1, 1), 1);
        heap.upsert((2, 2), 2);

        assert_eq!(heap.peek(), Some(((2, 2), 2)));

        heap.upsert((1, 1), 5);
        assert_eq!(heap.peek(), Some(((1, 1), 6)));
    }

    #[test]
    fn upsert_negative_delta_removes_at_zero() {
        let mut heap = PairHeap::new();
        heap.upsert((1, 1), 2);
        heap.upsert((1, 1), -2);

        assert!(!heap.contains((1, 1)));
        assert!(heap.is_empty());
    }

    #[test]
    fn upsert_negative_delta_past_zero_removes() {
        let mut heap = PairHeap::new();
        heap.upsert((1, 1), 2);
        heap.upsert((1, 1), -9);

        assert!(!heap.contains((1, 1)));
    }

    #[test]
    fn positions_stay_consistent_under_churn() {
        let mut heap = PairHeap::new();
        for i in 0..200u32 {
            heap.upsert((i % 7, i % 5), 1);
        }
        for i in 0..100u32 {
            heap.upsert((i % 7, i % 5), -1);
        }

        let mut last: Option<(Pair, Count)> = None;
        while let Some((pair, count)) = heap.extract_top() {
            if let Some((_, last_count)) = last {
                assert!(count <= last_count);
            }
            last = Some((pair, count));
        }
    }

    use proptest::prelude::*;

    proptest! {
        /// PQ top is global maximum: after any sequence of `upsert` calls,
        /// draining the heap via `extract_top` yields counts in
        /// non-increasing order, with ties broken to the lexicographically
        /// smallest pair.
        #[test]
        fn extract_top_drains_in_rank_order(
            ops in proptest::collection::vec((0u32..6, 0u32..6, -5i64..6), 1..200),
        ) {
            let mut heap = PairHeap::new();
            for (left, right, delta) in ops {
                heap.upsert((left, right), delta);
            }

            let mut last: Option<(Pair, Count)> = None;
            while let Some((pair, count)) = heap.extract_top() {
                if let Some((last_pair, last_count)) = last {
                    prop_assert!(count <= last_count);
                    if count == last_count {
                        prop_assert!(last_pair <= pair);
                    }
                }
                prop_assert!(count > 0);
                last = Some((pair, count));
            }
        }

        /// The position map stays consistent with heap contents after any
        /// sequence of `upsert` calls: every live pair's recorded position
        /// names the slot that actually holds it.
        #[test]
        fn positions_match_heap_contents(
            ops in proptest::collection::vec((0u32..8, 0u32..8, -4i64..5), 1..200),
        ) {
            let mut heap = PairHeap::new();
            for (left, right, delta) in ops {
                heap.upsert((left, right), delta);
            }

            for (&pair, &idx) in &heap.positions {
                prop_assert_eq!(heap.heap[idx].pair, pair);
            }
            prop_assert_eq!(heap.positions.len(), heap.heap.len());
        }
    }
}
