//! Text analysis module for Rubrika.
//!
//! Turns free text into the canonical token sequence the category matcher
//! works on: whitespace tokenization, lowercasing and base-form reduction,
//! assembled from small composable pieces.

pub mod analyzer;
pub mod lemmatizer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
