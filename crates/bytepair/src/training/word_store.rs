//! # Word

use crate::types::{Pair, TokenId};

/// A mutable span of tokens (a "word", in the BPE sense: a maximal run
/// produced by the text segmenter).
///
/// Rewritten in place as merges are applied during training.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word {
    tokens: Vec<TokenId>,
}

impl<S: AsRef<[TokenId]>> From<S> for Word {
    fn from(tokens: S) -> Self {
        Self::from_tokens(tokens)
    }
}

impl Word {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new word from tokens.
    pub fn from_tokens<S: AsRef<[TokenId]>>(tokens: S) -> Self {
        Self {
            tokens: tokens.as_ref().to_vec(),
        }
    }

    /// Create a new word from raw bytes.
    ///
    /// Token IDs `0..256` are identical to byte values, so this is a direct
    /// widening of each byte into a `TokenId`.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self {
            tokens: bytes.as_ref().iter().map(|&b| b as TokenId).collect(),
        }
    }

    /// Create a new word from a string slice's UTF-8 bytes.
    pub fn from_str(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// View the tokens as a slice.
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    /// Number of tokens in the word.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is this word empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over adjacent token pairs.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> + '_ {
        self.tokens.windows(2).map(|w| (w[0], w[1]))
    }

    /// Reduce the capacity of the internal vector to fit its contents.
    pub fn shrink_to_fit(&mut self) {
        self.tokens.shrink_to_fit();
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`, left to right.
    ///
    /// `on_merge(pair, delta)` is called once per pair-count change this
    /// merge induces in this word: `delta = -1` for a pair that no longer
    /// occurs, `delta = +1` for one that now does. The `prev` half of each
    /// boundary delta reads from the *already-rewritten* prefix, so adjacent
    /// merge sites in the same word (e.g. `aaaa` merging `(a,a)`) see each
    /// other's replacement tokens rather than the stale originals.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: Pair,
        replacement: TokenId,
        on_merge: &mut F,
    ) where
        F: FnMut(Pair, i32),
    {
        let (a, b) = pair;
        let n = self.tokens.len();

        if n < 2 {
            return;
        }

        let mut new_tokens: Vec<TokenId> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = self.tokens[i];

            if i + 1 < n && pair == (current, self.tokens[i + 1]) {
                if let Some(&x) = new_tokens.last() {
                    on_merge((x, a), Self::DEC);
                    on_merge((x, replacement), Self::INC);
                }

                on_merge(pair, Self::DEC);

                if i + 2 < n {
                    let y = self.tokens[i + 2];
                    on_merge((b, y), Self::DEC);
                    on_merge((replacement, y), Self::INC);
                }

                new_tokens.push(replacement);
                i += 2;
            } else {
                new_tokens.push(current);
                i += 1;
            }
        }

        self.tokens = new_tokens;
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`, returning the deltas.
    pub fn merge_pair(
        &mut self,
        pair: Pair,
        replacement: TokenId,
    ) -> Vec<(Pair, i32)> {
        let mut deltas = Vec::with_capacity(6);
        self.merge_pair_cb(pair, replacement, &mut |p, d| deltas.push((p, d)));
        deltas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tokens() {
        let word = Word::from_tokens(vec![1, 2, 3]);
        assert_eq!(word.tokens(), &[1, 2, 3]);
        assert_eq!(word.len(), 3);
        assert!(!word.is_empty());
    }

    #[test]
    fn into_word() {
        let word: Word = vec![1, 2, 3].into();
        assert_eq!(word.tokens(), &[1, 2, 3]);

        let word: Word = [1, 2, 3].into();
        assert_eq!(word.tokens(), &[1, 2, 3]);
    }

    #[test]
    fn from_str_is_identity_byte_tokens() {
        let word = Word::from_str("hello");
        assert_eq!(word.tokens(), &[104, 101, 108, 108, 111]);
    }

    #[test]
    fn pairs() {
        let word = Word::from_tokens(vec![1, 2, 3]);
        assert_eq!(word.pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn merge_pair_rewrites_and_reports_deltas() {
        let mut word = Word::from_tokens(vec![1, 2, 3, 1, 2, 2, 1]);

        let deltas = word.merge_pair((1, 2), 8);
        assert_eq!(word.tokens(), &[8, 3, 8, 2, 1]);

        assert_eq!(
            deltas,
            vec![
                ((1, 2), -1),
                ((2, 3), -1),
                ((8, 3), 1),
                ((3, 1), -1),
                ((3, 8), 1),
                ((1, 2), -1),
                ((2, 2), -1),
                ((8, 2), 1),
            ]
        );
    }

    #[test]
    fn merge_pair_on_repeated_symbol() {
        // "aaaa" with pair (a, a) -> m: greedy left-to-right non-overlapping
        // merge leaves one unmerged 'a' trailing the two merged pairs.
        let mut word = Word::from_tokens(vec![1, 1, 1, 1]);
        word.merge_pair_cb((1, 1), 9, &mut |_, _| {});
        assert_eq!(word.tokens(), &[9, 9]);
    }

    #[test]
    fn merge_pair_cb_matches_merge_pair() {
        let mut a = Word::from_tokens(vec![1, 2, 3, 1, 2, 2, 1]);
        let mut b = a.clone();

        let via_vec = a.merge_pair((1, 2), 1);

        let mut via_cb = vec![];
        b.merge_pair_cb((1, 2), 1, &mut |p, d| via_cb.push((p, d)));

        assert_eq!(a.tokens(), b.tokens());
        assert_eq!(via_vec, via_cb);
    }

    #[test]
    fn shrink_to_fit_drops_excess_capacity() {
        let mut word = Word::from_tokens(vec![1, 2, 3, 1, 2, 2, 1]);
        word.merge_pair((1, 2), 1);
        word.shrink_to_fit();
        assert_eq!(word.tokens().len(), word.tokens.capacity());
    }
}
