//! # Byte Vocabulary
//!
//! Token IDs `0..256` are identical to byte values: `b as TokenId`. This
//! holds for every model this crate trains or loads (see DESIGN.md Open
//! Question 1), so there's no bijection table to build or maintain — just
//! the identity conversions and, optionally, a `token id -> byte string`
//! debug table that grows as merges are learned (see
//! [`crate::training::TrainedModel::debug_vocab`]).

use crate::types::{CommonHashMap, Pair, TokenId, BYTE_ALPHABET_SIZE};

/// The token ID for byte value `b`.
#[inline(always)]
pub fn token_for_byte(b: u8) -> TokenId {
    b as TokenId
}

/// The byte value for `token`, if it names one of the 256 initial byte symbols.
#[inline(always)]
pub fn byte_for_token(token: TokenId) -> Option<u8> {
    (token < BYTE_ALPHABET_SIZE as TokenId).then_some(token as u8)
}

/// Expand a token ID into the byte string it represents, using a debug
/// vocabulary table built during training.
///
/// Returns `None` if `token` is absent from `table` — it names neither a
/// byte nor a learned merge this table tracked.
pub fn span_for_token(
    token: TokenId,
    table: &CommonHashMap<TokenId, Vec<u8>>,
) -> Option<Vec<u8>> {
    table.get(&token).cloned()
}

/// Rebuild a complete `token id -> byte string` table from an ordered
/// merge-rule list: the 256-entry byte alphabet plus one concatenated span
/// per merge, in rule order.
///
/// This is the post-hoc counterpart to the incremental debug vocabulary a
/// [`crate::training::Trainer`] builds during the merge loop (§9's "drop in
/// release, build incrementally" guidance) — used wherever a full span table
/// is needed from a merge-rule list alone, such as a loaded model file or a
/// [`crate::encoding::MergeTable`]'s whole-word lookup.
pub fn build_span_table(merge_rules: &[Pair]) -> CommonHashMap<TokenId, Vec<u8>> {
    let mut table: CommonHashMap<TokenId, Vec<u8>> =
        CommonHashMap::with_capacity(BYTE_ALPHABET_SIZE + merge_rules.len());
    for byte in 0..BYTE_ALPHABET_SIZE {
        table.insert(byte as TokenId, vec![byte as u8]);
    }
    for (i, &(left, right)) in merge_rules.iter().enumerate() {
        let mut span = table.get(&left).cloned().unwrap_or_default();
        span.extend(table.get(&right).cloned().unwrap_or_default());
        table.insert(BYTE_ALPHABET_SIZE as TokenId + i as TokenId, span);
    }
    table
}
