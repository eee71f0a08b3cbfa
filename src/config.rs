//! Classifier configuration.
//!
//! A [`ClassifierConfig`] is a plain serde value, usually read from a JSON
//! file. Every field has a default, so an empty object `{}` yields the
//! built-in categories with the Russian dictionary lemmatizer:
//!
//! ```json
//! {
//!   "uncategorized_column": "Без категории",
//!   "categories": [{"name": "Вопрос решен", "triggers": ["решить", "помочь"]}],
//!   "matching": {"mode": "phrase", "normalize_triggers": true},
//!   "lemmatizer": {"backend": "dictionary", "dictionary": "extra.tsv", "cache": true},
//!   "parallel": {"enabled": true, "threads": 4}
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::lemmatizer::{
    CachedLemmatizer, DictionaryLemmatizer, IdentityLemmatizer, Lemmatizer,
};
use crate::analysis::normalizer::Normalizer;
use crate::category::defaults::builtin_rules;
use crate::category::{CategoryRule, CategorySet, DEFAULT_UNCATEGORIZED_COLUMN, MatcherOptions};
use crate::classify::{Classifier, Execution};
use crate::error::{Result, RubrikaError};

/// Full classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Name of the catch-all indicator column.
    pub uncategorized_column: String,

    /// Category rules in output column order.
    pub categories: Vec<CategoryRule>,

    /// Trigger matching options.
    pub matching: MatcherOptions,

    /// Base-form reduction backend.
    pub lemmatizer: LemmatizerConfig,

    /// Default execution strategy for dataset passes.
    pub parallel: ParallelConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            uncategorized_column: DEFAULT_UNCATEGORIZED_COLUMN.to_string(),
            categories: builtin_rules(),
            matching: MatcherOptions::default(),
            lemmatizer: LemmatizerConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

/// Available base-form reducers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerBackend {
    /// Form-to-lemma lookup table.
    #[default]
    Dictionary,
    /// Words are kept as they are.
    Identity,
}

/// Lemmatizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmatizerConfig {
    pub backend: LemmatizerBackend,

    /// Extra TSV or JSON table layered over the built-in one.
    pub dictionary: Option<PathBuf>,

    /// Strip punctuation at word edges before lookup.
    pub strip_punctuation: bool,

    /// Memoize lookups.
    pub cache: bool,
}

impl Default for LemmatizerConfig {
    fn default() -> Self {
        Self {
            backend: LemmatizerBackend::Dictionary,
            dictionary: None,
            strip_punctuation: true,
            cache: true,
        }
    }
}

impl LemmatizerConfig {
    /// Instantiate the configured backend.
    pub fn build(&self) -> Result<Arc<dyn Lemmatizer>> {
        let lemmatizer: Arc<dyn Lemmatizer> = match self.backend {
            LemmatizerBackend::Identity => {
                if self.dictionary.is_some() {
                    return Err(RubrikaError::configuration(
                        "A lemma dictionary requires the 'dictionary' backend",
                    ));
                }
                Arc::new(IdentityLemmatizer::new())
            }
            LemmatizerBackend::Dictionary => {
                let mut dictionary = DictionaryLemmatizer::russian();
                if let Some(path) = &self.dictionary {
                    dictionary.extend(DictionaryLemmatizer::load_from_file(path)?);
                }
                Arc::new(dictionary.with_strip_punctuation(self.strip_punctuation))
            }
        };

        if self.cache {
            Ok(Arc::new(CachedLemmatizer::new(lemmatizer)))
        } else {
            Ok(lemmatizer)
        }
    }
}

/// Parallel execution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    pub enabled: bool,

    /// Worker threads; one per CPU when unset.
    pub threads: Option<usize>,
}

impl ParallelConfig {
    /// The execution strategy these settings describe.
    pub fn execution(&self) -> Execution {
        if self.enabled {
            Execution::with_threads(self.threads.unwrap_or_else(num_cpus::get))
        } else {
            Execution::Sequential
        }
    }
}

impl ClassifierConfig {
    /// Default configuration: built-in categories, Russian dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RubrikaError::configuration(format!(
                "Failed to read configuration '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_json_str(&content).map_err(|e| {
            RubrikaError::configuration(format!(
                "Invalid configuration '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a JSON configuration.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the category rules.
    pub fn category_set(&self) -> Result<CategorySet> {
        CategorySet::with_uncategorized_column(
            self.categories.clone(),
            self.uncategorized_column.clone(),
        )
    }

    /// Build the normalizer.
    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::with_lemmatizer(self.lemmatizer.build()?))
    }

    /// Build a ready classifier.
    pub fn build(&self) -> Result<Classifier> {
        let categories = self.category_set()?;
        let normalizer = self.normalizer()?;
        Ok(Classifier::with_normalizer(
            &categories,
            normalizer,
            self.matching,
        ))
    }

    /// Default execution strategy.
    pub fn execution(&self) -> Execution {
        self.parallel.execution()
    }
}
