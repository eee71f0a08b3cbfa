//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline and break raw text
//! into tokens. Comment classification only ever splits on whitespace, so
//! punctuation stays attached to the word it follows ("спасибо," is one token);
//! stripping it is the job of the base-form backend, not the tokenizer.
//!
//! # Examples
//!
//! ```
//! use rubrika::analysis::tokenizer::Tokenizer;
//! use rubrika::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Спасибо, мастер").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "Спасибо,");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so analyzers can be shared across the
/// worker threads of a parallel classification pass.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;
