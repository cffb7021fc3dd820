//! # Common Types

/// The token identifier type.
///
/// IDs `0..255` name the initial byte alphabet; the i-th learned merge is
/// assigned `256 + i`. Fixed at `u32` rather than generalized over an
/// integer-width type parameter: nothing in this crate's scope needs a
/// `u16`/`u64` vocabulary, and the reference implementation this crate is
/// grounded in (`SharifBPE`) is concrete over `uint32_t` throughout.
pub type TokenId = u32;

/// An occurrence count, weighted by word frequency.
pub type Count = u32;

/// An ordered pair of token IDs: `(left, right)`.
pub type Pair = (TokenId, TokenId);

/// Hash map alias used throughout this crate.
///
/// Backed by `ahash`, a fast non-cryptographic hash well suited to the
/// small integer-pair and integer-sequence keys used here.
pub type CommonHashMap<K, V> = ahash::AHashMap<K, V>;

/// Hash set alias used throughout this crate.
pub type CommonHashSet<V> = ahash::AHashSet<V>;

/// The size of the initial byte alphabet; the smallest legal vocabulary size.
pub const BYTE_ALPHABET_SIZE: usize = 256;

#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: S) {}

#[cfg(test)]
pub(crate) fn check_is_sync<S: Sync>(_: S) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::PairHeap;
    use crate::training::Trainer;

    #[test]
    fn trainer_and_heap_are_send_and_sync() {
        check_is_send(Trainer::new(256).unwrap());
        check_is_sync(PairHeap::new());
        check_is_send(PairHeap::new());
    }
}
