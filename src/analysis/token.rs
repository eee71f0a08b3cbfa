//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline: the
//! tokenizer produces one per whitespace-delimited word, and every filter
//! rewrites its text in place without adding or removing tokens.
//!
//! # Examples
//!
//! ```
//! use rubrika::analysis::token::Token;
//!
//! let token = Token::with_offsets("мастер", 1, 16, 28);
//! assert_eq!(token.text, "мастер");
//! assert_eq!(token.position, 1);
//! assert_eq!(token.start_offset, 16);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// Offsets are byte offsets into the original text and survive every filter,
/// so a normalized token can always be traced back to the word it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text of this token, keeping position and offsets.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    /// Slice of the original text this token was produced from.
    pub fn source<'a>(&self, original: &'a str) -> Option<&'a str> {
        original.get(self.start_offset..self.end_offset)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("спасибо", 0);
        assert_eq!(token.text, "спасибо");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
    }

    #[test]
    fn test_with_text_keeps_offsets() {
        let token = Token::with_offsets("Мастеру", 2, 10, 24).with_text("мастер");
        assert_eq!(token.text, "мастер");
        assert_eq!(token.position, 2);
        assert_eq!(token.start_offset, 10);
        assert_eq!(token.end_offset, 24);
    }

    #[test]
    fn test_token_source() {
        let original = "Спасибо мастеру";
        let token = Token::with_offsets("мастер", 1, 15, 29);
        assert_eq!(token.source(original), Some("мастеру"));
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("быстро", 0), Token::new("сделать", 1)];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "быстро");
        assert_eq!(format!("{}", collected[1]), "сделать");
    }
}
