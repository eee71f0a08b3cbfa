//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on Unicode whitespace and the ASCII
/// information separators (U+001C to U+001F).
///
/// Runs of whitespace collapse, leading and trailing whitespace is ignored,
/// and every other character (punctuation included) stays inside its word.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    fn is_separator(ch: char) -> bool {
        ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
    }

    /// Split `text` into `(start, end)` byte ranges of its words.
    fn word_spans(text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = None;

        for (offset, ch) in text.char_indices() {
            match (Self::is_separator(ch), start) {
                (true, Some(word_start)) => {
                    spans.push((word_start, offset));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }

        if let Some(word_start) = start {
            spans.push((word_start, text.len()));
        }

        spans
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = Self::word_spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| Token::with_offsets(&text[start..end], position, start, end))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer
            .tokenize("  быстро \t\nсделали  всё ")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "быстро");
        assert_eq!(tokens[1].text, "сделали");
        assert_eq!(tokens[2].text, "всё");
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_offsets_point_at_repeated_words() {
        let text = "ок ок";
        let tokens: Vec<Token> = WhitespaceTokenizer::new().tokenize(text).unwrap().collect();

        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[1].start_offset, 5);
        assert_eq!(tokens[1].source(text), Some("ок"));
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let tokens: Vec<Token> = WhitespaceTokenizer::new()
            .tokenize("Спасибо, мастер!")
            .unwrap()
            .collect();

        assert_eq!(tokens[0].text, "Спасибо,");
        assert_eq!(tokens[1].text, "мастер!");
    }

    #[test]
    fn test_information_separators_split_words() {
        let tokens: Vec<Token> = WhitespaceTokenizer::new()
            .tokenize("спасибо\u{1f}мастер\u{1c}\u{85}быстро")
            .unwrap()
            .collect();

        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["спасибо", "мастер", "быстро"]);
    }

    #[test]
    fn test_blank_input() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("").unwrap().count(), 0);
        assert_eq!(tokenizer.tokenize(" \t \n").unwrap().count(), 0);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
