//! # Vocabulary Training
//!
//! Incremental BPE training: repeatedly find the most frequent adjacent
//! token pair across the corpus and merge it, until the target vocabulary
//! size is reached. See [`trainer::Trainer`] for the entry point.

pub mod pair_index;
pub mod trainer;
pub mod word_store;

#[doc(inline)]
pub use pair_index::{PairCountMap, PairIndex, PairIndexMap};
#[doc(inline)]
pub use trainer::{TrainedModel, Trainer};
#[doc(inline)]
pub use word_store::Word;
