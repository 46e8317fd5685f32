//! Input tokenization.
//!
//! Converts raw player input into lowercase word tokens.

/// Punctuation stripped from the edges of each token.
const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw input string into words.
    ///
    /// - Splits on whitespace
    /// - Converts words to lowercase
    /// - Strips punctuation from the edges of each word
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<String> {
        input
            .split_whitespace()
            .map(|word| word.trim_matches(EDGE_PUNCTUATION))
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}
