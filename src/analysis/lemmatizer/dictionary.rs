//! Dictionary-backed lemmatizer.
//!
//! Maps inflected word forms to lemmas through an in-memory lookup table.
//! Tables are loaded from TSV (`form<TAB>lemma`, one pair per line, `#`
//! starts a comment) or from a JSON object (`{"мастеру": "мастер"}`).
//!
//! A small Russian table covering the vocabulary of the built-in comment
//! categories ships with the crate; see [`DictionaryLemmatizer::russian`].

use std::collections::HashMap;
use std::path::Path;

use ahash::AHashMap;
use log::{debug, warn};

use crate::analysis::lemmatizer::Lemmatizer;
use crate::error::{Result, RubrikaError};

const RUSSIAN_LEMMAS: &str = include_str!("../../../data/ru_lemmas.tsv");

/// Lemmatizer backed by a form → lemma lookup table.
///
/// Unknown words map to themselves. With punctuation stripping enabled (the
/// default), non-alphanumeric characters at either edge of the word are
/// removed before lookup, so `"спасибо,"` reduces like `"спасибо"`. A word
/// made only of symbols is returned untouched.
#[derive(Debug, Clone)]
pub struct DictionaryLemmatizer {
    lemmas: AHashMap<String, String>,
    strip_punctuation: bool,
}

impl Default for DictionaryLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryLemmatizer {
    /// Create an empty dictionary (every word maps to itself).
    pub fn new() -> Self {
        DictionaryLemmatizer {
            lemmas: AHashMap::new(),
            strip_punctuation: true,
        }
    }

    /// Create a dictionary from `(form, lemma)` pairs.
    ///
    /// Forms and lemmas are lowercased; later pairs override earlier ones.
    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: Into<String>,
    {
        let lemmas = pairs
            .into_iter()
            .map(|(form, lemma)| (form.as_ref().to_lowercase(), lemma.into().to_lowercase()))
            .collect();

        DictionaryLemmatizer {
            lemmas,
            strip_punctuation: true,
        }
    }

    /// The built-in Russian table.
    pub fn russian() -> Self {
        match Self::from_tsv_str(RUSSIAN_LEMMAS) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!("Built-in Russian lemma table is unusable, falling back to identity: {e}");
                Self::new()
            }
        }
    }

    /// Parse a TSV table.
    pub fn from_tsv_str(content: &str) -> Result<Self> {
        let mut pairs = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(form), Some(lemma), None) if !form.is_empty() && !lemma.is_empty() => {
                    pairs.push((form.trim().to_string(), lemma.trim().to_string()));
                }
                _ => {
                    return Err(RubrikaError::configuration(format!(
                        "Malformed lemma table line {}: expected 'form<TAB>lemma', got '{}'",
                        line_num + 1,
                        line
                    )));
                }
            }
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Parse a JSON object mapping forms to lemmas.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let map: HashMap<String, String> = serde_json::from_str(content)?;

        if let Some((form, lemma)) = map
            .iter()
            .find(|(form, lemma)| form.trim().is_empty() || lemma.trim().is_empty())
        {
            return Err(RubrikaError::configuration(format!(
                "Malformed lemma table entry: expected non-empty form and lemma, got '{form}' -> '{lemma}'"
            )));
        }

        Ok(Self::from_pairs(
            map.into_iter()
                .map(|(form, lemma)| (form.trim().to_string(), lemma.trim().to_string())),
        ))
    }

    /// Load a table from a file; `.json` files are parsed as JSON, anything
    /// else as TSV.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RubrikaError::configuration(format!(
                "Failed to read lemma dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dictionary = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_tsv_str(&content)?
        };

        debug!(
            "Loaded {} lemma entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Enable or disable edge punctuation stripping.
    pub fn with_strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = strip;
        self
    }

    /// Add or replace a single entry.
    pub fn insert<F: AsRef<str>, L: Into<String>>(&mut self, form: F, lemma: L) {
        self.lemmas
            .insert(form.as_ref().to_lowercase(), lemma.into().to_lowercase());
    }

    /// Merge another table into this one; its entries win on conflict.
    pub fn extend(&mut self, other: DictionaryLemmatizer) {
        self.lemmas.extend(other.lemmas);
    }

    /// Number of forms in the table.
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    fn lookup<'a>(&'a self, word: &'a str) -> &'a str {
        self.lemmas.get(word).map(String::as_str).unwrap_or(word)
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn base_form(&self, word: &str) -> String {
        if !self.strip_punctuation {
            return self.lookup(word).to_string();
        }

        let stripped = word.trim_matches(|c: char| !c.is_alphanumeric());
        if stripped.is_empty() {
            return word.to_string();
        }

        self.lookup(stripped).to_string()
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
