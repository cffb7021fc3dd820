//! # Encoding
//!
//! Applies a trained merge-rule table back onto text, token by token.

pub mod encoder;
pub mod parallel;

#[doc(inline)]
pub use encoder::{Encoder, MergeTable};
#[doc(inline)]
pub use parallel::encode_all;
