//! Base-form (lemma) token filter.

use std::sync::Arc;

use super::Filter;
use crate::analysis::lemmatizer::{DictionaryLemmatizer, Lemmatizer};
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Filter that replaces each token with its dictionary base form.
///
/// The filter never drops a token: whatever the backend returns, even an
/// unchanged word, takes the token's place.
pub struct LemmaFilter {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a lemma filter backed by the built-in Russian dictionary.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Arc::new(DictionaryLemmatizer::russian()),
        }
    }

    /// Create a lemma filter with a custom backend.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }

    /// The backend this filter delegates to.
    pub fn lemmatizer(&self) -> &Arc<dyn Lemmatizer> {
        &self.lemmatizer
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let lemma = self.lemmatizer.base_form(&token.text);
                token.with_text(lemma)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lemmatizer::IdentityLemmatizer;
    use crate::analysis::token::Token;

    #[test]
    fn test_lemma_filter() {
        let filter = LemmaFilter::new();
        let tokens = vec![
            Token::new("мастеру", 0),
            Token::new("сделали", 1),
            Token::new("нормально", 2),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "мастер");
        assert_eq!(result[1].text, "сделать");
        assert_eq!(result[2].text, "нормально");
    }

    #[test]
    fn test_identity_backend() {
        let filter = LemmaFilter::with_lemmatizer(Arc::new(IdentityLemmatizer::new()));
        let tokens = vec![Token::new("мастеру", 0)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "мастеру");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LemmaFilter::new().name(), "lemma");
    }
}
