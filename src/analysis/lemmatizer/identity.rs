//! Identity lemmatizer implementation.

use crate::analysis::lemmatizer::Lemmatizer;

/// Lemmatizer that returns words unchanged.
///
/// Useful when the keyword lists already enumerate every inflected form, or
/// for languages with no dictionary available.
#[derive(Debug, Clone, Default)]
pub struct IdentityLemmatizer;

impl IdentityLemmatizer {
    pub fn new() -> Self {
        IdentityLemmatizer
    }
}

impl Lemmatizer for IdentityLemmatizer {
    fn base_form(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lemmatizer() {
        let lemmatizer = IdentityLemmatizer::new();

        assert_eq!(lemmatizer.base_form("мастеру"), "мастеру");
        assert_eq!(lemmatizer.base_form("спасибо,"), "спасибо,");
        assert_eq!(lemmatizer.base_form(""), "");
    }
}
