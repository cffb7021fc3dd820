//! # Error Types

/// Errors from bytepair operations.
#[derive(Debug, thiserror::Error)]
pub enum BpeError {
    /// Requested vocab size is below the minimum (256, the byte alphabet).
    #[error("vocab size ({size}) must be >= 256")]
    VocabSizeTooSmall {
        /// The vocab size that was too small.
        size: usize,
    },

    /// A line in a merge-rule model file could not be parsed.
    #[error("invalid model line {line_number}: {text:?}")]
    InvalidModelLine {
        /// 1-based line number within the model file.
        line_number: usize,
        /// The offending line, verbatim.
        text: String,
    },

    /// I/O error reading a corpus or model file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for bytepair operations.
pub type BpeResult<T> = Result<T, BpeError>;
