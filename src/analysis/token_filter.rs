//! Token filter implementations for token transformation.
//!
//! Filters rewrite the tokens produced by a tokenizer. The classification
//! pipeline relies on one property of every filter here: a filter maps each
//! token to exactly one token, so the normalized sequence always has as many
//! entries as the input had words.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`lemma::LemmaFilter`] - Reduces tokens to their dictionary base form
//!
//! # Examples
//!
//! ```
//! use rubrika::analysis::token_filter::Filter;
//! use rubrika::analysis::token_filter::lowercase::LowercaseFilter;
//! use rubrika::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Спасибо", 0), Token::new("МАСТЕРУ", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "спасибо");
//! assert_eq!(filtered[1].text, "мастеру");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lemma;
pub mod lowercase;
