//! Pipeline analyzer that combines a tokenizer and filters.
//!
//! Processing happens in two steps:
//! 1. Tokenizer: splits text into tokens
//! 2. Token Filters: applied sequentially in the order they were added
//!
//! # Examples
//!
//! ```
//! use rubrika::analysis::analyzer::Analyzer;
//! use rubrika::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use rubrika::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//! use rubrika::analysis::token_filter::lowercase::LowercaseFilter;
//! use rubrika::analysis::token_filter::lemma::LemmaFilter;
//! use std::sync::Arc;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(LemmaFilter::new()))
//!     .with_name("comments");
//!
//! let tokens: Vec<_> = analyzer.analyze("Мастеру СПАСИБО").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "мастер");
//! assert_eq!(tokens[1].text, "спасибо");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The custom name of this analyzer.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    #[test]
    fn test_pipeline_without_filters() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));
        let tokens: Vec<_> = analyzer.analyze("Вопрос Решен").unwrap().collect();

        assert_eq!(tokens[0].text, "Вопрос");
        assert_eq!(tokens[1].text, "Решен");
        assert_eq!(analyzer.pipeline_name(), "pipeline_whitespace");
    }

    #[test]
    fn test_filters_apply_in_order() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("lower");

        let tokens: Vec<_> = analyzer.analyze("Вопрос Решен").unwrap().collect();

        assert_eq!(tokens[0].text, "вопрос");
        assert_eq!(tokens[1].text, "решен");
        assert_eq!(analyzer.filters().len(), 1);
        assert_eq!(analyzer.tokenizer().name(), "whitespace");
        assert!(format!("{analyzer:?}").contains("lowercase"));
    }
}
