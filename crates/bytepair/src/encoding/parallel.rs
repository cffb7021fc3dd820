//! # Parallel Encoding
//!
//! Encodes a batch of words by partitioning the list into contiguous index
//! ranges and handing each range its own [`Encoder`] (and so its own
//! whole-word cache) on a `rayon` worker. Static partitioning, not a
//! work-stealing pool, mirroring `BPETokenizer::Encode`'s fixed thread
//! sections in `original_source`.

use crate::encoding::encoder::{Encoder, MergeTable};
use crate::text::Segmenter;
use crate::types::TokenId;

/// Encode `words` in parallel, preserving input order.
///
/// Splits `words` into `partitions` contiguous chunks; each chunk is encoded
/// by its own [`Encoder`] instance on a `rayon` thread, so whole-word caches
/// are not shared across partitions.
#[cfg(feature = "rayon")]
pub fn encode_all(
    words: &[String],
    merges: &MergeTable,
    segmenter: &Segmenter,
    partitions: usize,
) -> Vec<Vec<TokenId>> {
    use rayon::prelude::*;

    if words.is_empty() {
        return Vec::new();
    }

    let chunk_len = words.len().div_ceil(partitions.max(1));

    words
        .par_chunks(chunk_len)
        .flat_map(|chunk| {
            let mut encoder = Encoder::with_segmenter(merges.clone(), segmenter.clone());
            chunk
                .iter()
                .map(|word| encoder.encode_word(word))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Sequential fallback used when the `rayon` feature is disabled.
#[cfg(not(feature = "rayon"))]
pub fn encode_all(
    words: &[String],
    merges: &MergeTable,
    segmenter: &Segmenter,
    _partitions: usize,
) -> Vec<Vec<TokenId>> {
    let mut encoder = Encoder::with_segmenter(merges.clone(), segmenter.clone());
    words.iter().map(|word| encoder.encode_word(word)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_encode_matches_sequential_encode() {
        let merges = MergeTable::from_merge_rules(&[(b'a' as TokenId, b'b' as TokenId)]);
        let segmenter = Segmenter::gpt2();

        let words: Vec<String> = vec!["ab", "cd", "ab", "ef", "abab"]
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut sequential_encoder = Encoder::with_segmenter(merges.clone(), segmenter.clone());
        let sequential: Vec<Vec<TokenId>> = words
            .iter()
            .map(|w| sequential_encoder.encode_word(w))
            .collect();

        let parallel = encode_all(&words, &merges, &segmenter, 3);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let merges = MergeTable::default();
        let segmenter = Segmenter::gpt2();
        assert!(encode_all(&[], &merges, &segmenter, 4).is_empty());
    }
}
