//! Base-form reducers used by the normalization pipeline.
//!
//! A [`Lemmatizer`] maps a single lowercased word to its canonical dictionary
//! form. It is a capability, not a language model: any backend that is total
//! over its input (returns *something* for every word, usually the word itself
//! when it is unknown) can be dropped in without touching the matcher.
//!
//! # Available Backends
//!
//! - [`IdentityLemmatizer`] - Returns words unchanged
//! - [`DictionaryLemmatizer`] - Form → lemma lookup table (TSV or JSON)
//! - [`CachedLemmatizer`] - Memoizes any other backend
//!
//! # Examples
//!
//! ```
//! use rubrika::analysis::lemmatizer::{DictionaryLemmatizer, Lemmatizer};
//!
//! let lemmatizer = DictionaryLemmatizer::russian();
//! assert_eq!(lemmatizer.base_form("мастеру"), "мастер");
//! assert_eq!(lemmatizer.base_form("спасибо,"), "спасибо");
//! assert_eq!(lemmatizer.base_form("быстрота"), "быстрота");
//! ```

/// Trait for base-form reduction backends.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its dictionary base form.
    ///
    /// Must return a value for every input; unknown words map to themselves.
    fn base_form(&self, word: &str) -> String;

    /// Get the name of this backend.
    fn name(&self) -> &'static str;
}

pub mod cached;
pub mod dictionary;
pub mod identity;

pub use cached::CachedLemmatizer;
pub use dictionary::DictionaryLemmatizer;
pub use identity::IdentityLemmatizer;
