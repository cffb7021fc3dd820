#![warn(missing_docs, unused)]
//! # `bytepair`
//!
//! Byte-Pair Encoding training and encoding for subword tokenization.
//!
//! ## Training
//!
//! [`training::Trainer`] learns an ordered list of merge rules from a
//! corpus, growing the 256-symbol byte alphabet to a requested vocabulary
//! size:
//!
//! ```
//! use bytepair::training::Trainer;
//!
//! let trainer = Trainer::new(300).unwrap();
//! let model = trainer.train_from_samples(["hello world", "hello there"]);
//! println!("learned {} merges", model.merge_rules.len());
//! ```
//!
//! ## Encoding
//!
//! [`encoding::Encoder`] applies a trained [`encoding::MergeTable`] back onto text:
//!
//! ```
//! use bytepair::encoding::{Encoder, MergeTable};
//! use bytepair::training::Trainer;
//!
//! let trainer = Trainer::new(300).unwrap();
//! let model = trainer.train_from_samples(["hello world", "hello there"]);
//!
//! let mut encoder = Encoder::new(MergeTable::from_merge_rules(&model.merge_rules));
//! let tokens = encoder.encode("hello world");
//! ```
//!
//! ## Model Files
//!
//! [`io::merge_rules`] reads and writes the plain-text merge-rule model
//! format: two decimal token IDs per line, in rank order.
//!
//! ## Crate Features
//!
//! * `rayon` (default) — parallel corpus word counting ([`text::mmap_reader`])
//!   and parallel encoding ([`encoding::parallel`]).

pub mod encoding;
pub mod heap;
pub mod io;
pub mod text;
pub mod training;
pub mod types;
pub mod vocab;

mod errors;

#[doc(inline)]
pub use errors::{BpeError, BpeResult};
#[doc(inline)]
pub use types::{Count, Pair, TokenId};
