//! # Word Segmenter

use fancy_regex::Regex;

/// The GPT-2-style pre-tokenizer pattern.
///
/// Splits contractions, runs of letters, runs of digits, runs of other
/// non-space characters, and whitespace, each as their own piece, with a
/// trailing-whitespace rule that keeps a line's final run of spaces attached
/// to the following word rather than splitting it off on its own. The
/// `\s+(?!\S)` alternative is a negative lookahead, which is why this needs
/// `fancy_regex` rather than the plain `regex` crate.
pub const GPT2_WORD_PATTERN: &str = r"'(?:[sdmt]|ll|ve|re)| ?\p{L}++| ?\p{N}++| ?[^\s\p{L}\p{N}]++|\s++$|\s+(?!\S)|\s";

/// Splits text into the words a BPE vocabulary is trained and applied over.
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: Regex,
}

impl Segmenter {
    /// Compile a segmenter from a custom pattern.
    ///
    /// # Errors
    /// Returns the underlying `fancy_regex` error if `pattern` fails to compile.
    pub fn with_pattern(pattern: &str) -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The default GPT-2-style segmenter.
    pub fn gpt2() -> Self {
        Self::with_pattern(GPT2_WORD_PATTERN).expect("GPT2_WORD_PATTERN must compile")
    }

    /// Iterate over the words found in `text`, in order.
    pub fn segment<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .find_iter(text)
            .map(|m| m.expect("segmenter regex match failed").as_str())
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::gpt2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_spaces() {
        let seg = Segmenter::gpt2();
        let words: Vec<&str> = seg.segment("hello world").collect();
        assert_eq!(words, vec!["hello", " world"]);
    }

    #[test]
    fn keeps_trailing_whitespace_attached() {
        let seg = Segmenter::gpt2();
        let words: Vec<&str> = seg.segment("a   ").collect();
        assert_eq!(words, vec!["a", "   "]);
    }

    #[test]
    fn splits_contractions() {
        let seg = Segmenter::gpt2();
        let words: Vec<&str> = seg.segment("it's").collect();
        assert_eq!(words, vec!["it", "'s"]);
    }

    #[test]
    fn splits_digit_runs_separately_from_letters() {
        let seg = Segmenter::gpt2();
        let words: Vec<&str> = seg.segment("room101").collect();
        assert_eq!(words, vec!["room", "101"]);
    }

    #[test]
    fn custom_pattern() {
        let seg = Segmenter::with_pattern(r"\S+").unwrap();
        let words: Vec<&str> = seg.segment("a b  c").collect();
        assert_eq!(words, vec!["a", "b", "c"]);
    }
}
