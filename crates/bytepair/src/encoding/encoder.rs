//! # Encoder

use crate::text::Segmenter;
use crate::types::{CommonHashMap, Pair, TokenId};
use crate::vocab::byte_vocab::build_span_table;

/// A trained merge-rule table, ready to encode text.
///
/// Built from a [`crate::training::TrainedModel`]'s `merge_rules`, or loaded
/// from a model file via [`crate::io::merge_rules::read_merge_rules`]. Rank
/// is a merge rule's position in the list plus 256 — equivalently, the token
/// ID it introduced — and encoding always prefers the lowest-rank applicable
/// merge, i.e. the merge learned earliest during training.
///
/// Also carries a whole-word lookup (`full word string -> token id`),
/// populated once from the merge rules themselves: any learned token whose
/// recursively-concatenated byte span is valid UTF-8 is indexed under that
/// string, so a word matching a merge composite exactly short-circuits the
/// iterative scan entirely.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    ranks: CommonHashMap<Pair, TokenId>,
    whole_words: CommonHashMap<String, TokenId>,
}

impl MergeTable {
    /// Build a merge table from an ordered merge-rule list.
    pub fn from_merge_rules(merge_rules: &[Pair]) -> Self {
        let mut ranks = CommonHashMap::with_capacity(merge_rules.len());
        for (i, &pair) in merge_rules.iter().enumerate() {
            ranks.insert(pair, 256 + i as TokenId);
        }

        let spans = build_span_table(merge_rules);
        let mut whole_words = CommonHashMap::with_capacity(merge_rules.len());
        for i in 0..merge_rules.len() {
            let token = 256 + i as TokenId;
            if let Some(word) = spans.get(&token).and_then(|bytes| std::str::from_utf8(bytes).ok()) {
                whole_words.insert(word.to_string(), token);
            }
        }

        Self { ranks, whole_words }
    }

    /// The rank (resulting token ID) of `pair`, if it is a known merge.
    pub fn rank_of(
        &self,
        pair: Pair,
    ) -> Option<TokenId> {
        self.ranks.get(&pair).copied()
    }

    /// The token ID for `word`, if some learned merge's byte span is exactly `word`.
    pub fn whole_word_token(
        &self,
        word: &str,
    ) -> Option<TokenId> {
        self.whole_words.get(word).copied()
    }

    /// Number of learned merges in this table.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Is this table empty (byte-alphabet-only vocabulary)?
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Encodes text into token IDs using a trained [`MergeTable`].
///
/// In addition to the merge table's own whole-word lookup, holds a small
/// per-instance cache (`word string -> token IDs`) populated lazily as
/// non-composite words are scanned, so a repeat word never re-runs the
/// merge loop either.
pub struct Encoder {
    merges: MergeTable,
    segmenter: Segmenter,
    word_cache: CommonHashMap<String, Vec<TokenId>>,
}

impl Encoder {
    /// Build an encoder from a merge table, using the default GPT-2-style segmenter.
    pub fn new(merges: MergeTable) -> Self {
        Self::with_segmenter(merges, Segmenter::gpt2())
    }

    /// Build an encoder from a merge table and a custom word segmenter.
    ///
    /// The segmenter must match the one used during training: a different
    /// pre-tokenizer produces a different model, per spec.
    pub fn with_segmenter(
        merges: MergeTable,
        segmenter: Segmenter,
    ) -> Self {
        Self {
            merges,
            segmenter,
            word_cache: CommonHashMap::default(),
        }
    }

    /// Encode a full text sample: segment into words, encode each, concatenate.
    pub fn encode(
        &mut self,
        text: &str,
    ) -> Vec<TokenId> {
        let mut out = Vec::new();
        let words: Vec<String> = self.segmenter.segment(text).map(str::to_string).collect();
        for word in words {
            out.extend(self.encode_word(&word));
        }
        out
    }

    /// Encode a single pre-segmented word.
    ///
    /// Checks the merge table's whole-word lookup first: if some learned
    /// token's byte span is exactly `word`, that single token ID is emitted
    /// and no scan happens at all. Otherwise falls back to this encoder's
    /// own per-instance cache of previously-encoded words; on a miss there,
    /// splits into byte tokens and repeatedly applies the lowest-rank
    /// applicable merge, rewriting in place, until no pair in the word has a
    /// known rank.
    pub fn encode_word(
        &mut self,
        word: &str,
    ) -> Vec<TokenId> {
        if let Some(token) = self.merges.whole_word_token(word) {
            return vec![token];
        }

        if let Some(cached) = self.word_cache.get(word) {
            return cached.clone();
        }

        let mut tokens: Vec<TokenId> = word.as_bytes().iter().map(|&b| b as TokenId).collect();
        self.apply_merges(&mut tokens);

        self.word_cache.insert(word.to_string(), tokens.clone());
        tokens
    }

    /// Apply every applicable merge to `tokens` in place, lowest rank first each pass.
    fn apply_merges(
        &self,
        tokens: &mut Vec<TokenId>,
    ) {
        while tokens.len() > 1 {
            let mut min_rank: Option<TokenId> = None;
            let mut min_pair: Option<Pair> = None;

            for i in 0..tokens.len() - 1 {
                let pair = (tokens[i], tokens[i + 1]);
                if let Some(rank) = self.merges.rank_of(pair) {
                    if min_rank.is_none_or(|current| rank < current) {
                        min_rank = Some(rank);
                        min_pair = Some(pair);

                        if rank == 256 {
                            // No rank can be lower; stop scanning this pass.
                            break;
                        }
                    }
                }
            }

            let (Some(pair), Some(rank)) = (min_pair, min_rank) else {
                break;
            };

            // Two-pointer in-place rewrite, left to right, non-overlapping.
            let mut write = 0;
            let mut read = 0;
            while read < tokens.len() {
                if read + 1 < tokens.len() && tokens[read] == pair.0 && tokens[read + 1] == pair.1 {
                    tokens[write] = rank;
                    write += 1;
                    read += 2;
                } else {
                    tokens[write] = tokens[read];
                    write += 1;
                    read += 1;
                }
            }
            tokens.truncate(write);
        }
    }
}
