//! # Text Segmentation and Corpus Reading

pub mod mmap_reader;
pub mod segmenter;

#[doc(inline)]
pub use mmap_reader::count_words_in_file;
#[doc(inline)]
pub use segmenter::{GPT2_WORD_PATTERN, Segmenter};
