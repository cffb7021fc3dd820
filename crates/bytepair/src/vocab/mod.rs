//! # Byte Vocabulary

pub mod byte_vocab;

#[doc(inline)]
pub use byte_vocab::{build_span_table, byte_for_token, span_for_token, token_for_byte};
