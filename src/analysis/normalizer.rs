//! Text normalizer: raw comment text to canonical tokens.
//!
//! The normalizer is the entry point the classifier uses for every record. It
//! lowercases the text, splits it on whitespace and reduces each word to its
//! base form. The output always has one token per whitespace-delimited word,
//! in input order, with nothing dropped or deduplicated.
//!
//! # Examples
//!
//! ```
//! use rubrika::analysis::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! assert_eq!(
//!     normalizer.normalize(Some("Спасибо, мастер быстро все сделал")),
//!     vec!["спасибо", "мастер", "быстро", "весь", "сделать"]
//! );
//! assert!(normalizer.normalize(None).is_empty());
//! ```

use std::sync::Arc;

use log::warn;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::lemmatizer::{DictionaryLemmatizer, Lemmatizer};
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::dataset::value::Value;

/// Converts raw text into an ordered sequence of base-form tokens.
#[derive(Clone)]
pub struct Normalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer backed by the built-in Russian lemma table.
    pub fn new() -> Self {
        Self::with_lemmatizer(Arc::new(DictionaryLemmatizer::russian()))
    }

    /// Create the standard whitespace → lowercase → lemma pipeline around a
    /// custom base-form backend.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(LemmaFilter::with_lemmatizer(lemmatizer)))
            .with_name("comment_normalizer");

        Normalizer {
            analyzer: Arc::new(analyzer),
        }
    }

    /// Use an arbitrary analyzer.
    ///
    /// The analyzer must keep one output token per input word for the length
    /// guarantee of [`Normalizer::normalize`] to hold.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        Normalizer { analyzer }
    }

    /// Normalize an optional text value.
    ///
    /// A missing value yields an empty sequence. Never fails: an analyzer
    /// error is logged and treated like empty text.
    pub fn normalize(&self, text: Option<&str>) -> Vec<String> {
        match text {
            Some(text) => self.normalize_str(text),
            None => Vec::new(),
        }
    }

    /// Normalize a table cell; only text cells produce tokens.
    pub fn normalize_value(&self, value: &Value) -> Vec<String> {
        self.normalize(value.as_text())
    }

    /// Normalize a present text value.
    pub fn normalize_str(&self, text: &str) -> Vec<String> {
        match self.analyzer.analyze(text) {
            Ok(tokens) => tokens.map(|token| token.text).collect(),
            Err(e) => {
                warn!("Analyzer '{}' failed, treating text as empty: {e}", self.analyzer.name());
                Vec::new()
            }
        }
    }

    /// The analyzer behind this normalizer.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}
