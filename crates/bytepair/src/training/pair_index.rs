//! # Pair Index

use crate::training::word_store::Word;
use crate::types::{CommonHashMap, CommonHashSet, Count, Pair};

/// A map from [`Pair`] to its corpus-wide occurrence count.
pub type PairCountMap = CommonHashMap<Pair, Count>;

/// A map from [`Pair`] to the set of word indices it may occur in.
///
/// Entries are allowed to over-approximate: once a word index is inserted
/// for a pair it is never removed, even after every occurrence in that word
/// has been merged away. The trainer tolerates stale indices by checking the
/// live count before doing any work for them.
pub type PairIndexMap = CommonHashMap<Pair, CommonHashSet<usize>>;

/// An inverted index of pair occurrences over a corpus of words.
#[derive(Debug, Clone, Default)]
pub struct PairIndex {
    /// Corpus-wide occurrence count, by pair.
    pub pair_counts: PairCountMap,

    /// Word indices a pair may occur in, by pair.
    pub pair_index: PairIndexMap,
}

impl PairIndex {
    /// Build a [`PairIndex`] from a word list and matching per-word frequencies.
    ///
    /// # Arguments
    /// * `words` - the corpus's distinct words.
    /// * `frequencies` - `frequencies[i]` is the corpus-wide count of `words[i]`.
    pub fn from_words(
        words: &[Word],
        frequencies: &[Count],
    ) -> Self {
        let size_hint = words.len() / 4;

        let mut index = PairIndex {
            pair_counts: PairCountMap::with_capacity(size_hint),
            pair_index: PairIndexMap::with_capacity(size_hint),
        };

        for (word_idx, word) in words.iter().enumerate() {
            let freq = frequencies[word_idx];
            if freq == 0 || word.len() < 2 {
                continue;
            }

            for pair in word.pairs() {
                *index.pair_counts.entry(pair).or_default() += freq;
                index.pair_index.entry(pair).or_default().insert(word_idx);
            }
        }

        index
    }
}
