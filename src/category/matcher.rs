//! Multi-label keyword matcher.
//!
//! A [`CategoryMatcher`] is compiled once from a [`CategorySet`] and then
//! evaluates normalized token sequences. Every category is evaluated on its
//! own: a category fires when any of its triggers equals a token exactly (no
//! substring or fuzzy matching), and any number of categories may fire for
//! the same record. The uncategorized flag is the complement of "at least one
//! category fired".
//!
//! # Examples
//!
//! ```
//! use rubrika::category::{CategoryMatcher, CategoryRule, CategorySet};
//!
//! let set = CategorySet::new(vec![
//!     CategoryRule::new("Speed", ["быстро"]),
//!     CategoryRule::new("Staff", ["мастер", "спасибо"]),
//! ]).unwrap();
//! let matcher = CategoryMatcher::new(&set);
//!
//! let result = matcher.classify(&["спасибо", "мастер", "быстро"]);
//! assert_eq!(result.get("Speed"), Some(true));
//! assert_eq!(result.get("Staff"), Some(true));
//! assert!(!result.is_uncategorized());
//!
//! let result = matcher.classify::<&str>(&[]);
//! assert!(result.is_uncategorized());
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::category::rule::CategorySet;

/// How multi-word triggers are compared against a token sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every trigger, phrases included, must equal a single token.
    ///
    /// Whitespace tokenization never produces a token containing a space, so
    /// multi-word triggers can never fire in this mode.
    #[default]
    Token,
    /// Multi-word triggers match a run of consecutive tokens.
    Phrase,
}

/// Options applied when compiling a matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherOptions {
    /// Trigger comparison mode.
    pub mode: MatchMode,
    /// Run every trigger through the normalizer once at compile time.
    pub normalize_triggers: bool,
}

#[derive(Debug)]
struct CompiledRule {
    name: Arc<str>,
    tokens: AHashSet<String>,
    phrases: Vec<Vec<String>>,
}

impl CompiledRule {
    fn matches<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        if tokens.iter().any(|token| self.tokens.contains(token.as_ref())) {
            return true;
        }

        self.phrases.iter().any(|phrase| {
            tokens.windows(phrase.len()).any(|window| {
                window
                    .iter()
                    .zip(phrase)
                    .all(|(token, word)| token.as_ref() == word)
            })
        })
    }
}

/// Compiled, immutable form of a [`CategorySet`].
#[derive(Debug)]
pub struct CategoryMatcher {
    rules: Vec<CompiledRule>,
    uncategorized_column: Arc<str>,
    options: MatcherOptions,
}

impl CategoryMatcher {
    /// Compile with default options: literal triggers, single-token matching.
    pub fn new(set: &CategorySet) -> Self {
        Self::compile(set, MatcherOptions::default(), |trigger| trigger.to_string())
    }

    /// Compile with explicit options.
    ///
    /// `normalizer` is only consulted when `options.normalize_triggers` is set;
    /// the normalized words of a trigger are joined by single spaces.
    pub fn with_options(set: &CategorySet, options: MatcherOptions, normalizer: &Normalizer) -> Self {
        if options.normalize_triggers {
            Self::compile(set, options, |trigger| {
                normalizer.normalize_str(trigger).join(" ")
            })
        } else {
            Self::compile(set, options, |trigger| trigger.to_string())
        }
    }

    fn compile<F>(set: &CategorySet, options: MatcherOptions, canonical: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let rules = set
            .iter()
            .map(|rule| {
                let mut tokens = AHashSet::new();
                let mut phrases = Vec::new();

                for trigger in &rule.triggers {
                    let trigger = canonical(trigger);
                    match options.mode {
                        MatchMode::Token => {
                            tokens.insert(trigger);
                        }
                        MatchMode::Phrase => {
                            let words: Vec<String> =
                                trigger.split_whitespace().map(str::to_string).collect();
                            match words.len() {
                                0 => {}
                                1 => {
                                    tokens.extend(words);
                                }
                                _ => {
                                    if !phrases.contains(&words) {
                                        phrases.push(words);
                                    }
                                }
                            }
                        }
                    }
                }

                CompiledRule {
                    name: Arc::from(rule.name.as_str()),
                    tokens,
                    phrases,
                }
            })
            .collect();

        CategoryMatcher {
            rules,
            uncategorized_column: Arc::from(set.uncategorized_column()),
            options,
        }
    }

    /// Evaluate every category against one record's tokens.
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> ClassificationResult {
        let categories: Vec<(Arc<str>, bool)> = self
            .rules
            .iter()
            .map(|rule| (Arc::clone(&rule.name), rule.matches(tokens)))
            .collect();
        let uncategorized = !categories.iter().any(|(_, matched)| *matched);

        ClassificationResult {
            categories,
            uncategorized,
            uncategorized_column: Arc::clone(&self.uncategorized_column),
        }
    }

    /// Category names in column order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_ref())
    }

    /// Name of the catch-all indicator column.
    pub fn uncategorized_column(&self) -> &str {
        &self.uncategorized_column
    }

    /// Every column a classification writes, in output order.
    pub fn output_columns(&self) -> Vec<String> {
        self.category_names()
            .chain(std::iter::once(self.uncategorized_column()))
            .map(str::to_string)
            .collect()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the matcher has no categories.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Options the matcher was compiled with.
    pub fn options(&self) -> MatcherOptions {
        self.options
    }
}

/// Per-record outcome: one flag per category plus the uncategorized flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    categories: Vec<(Arc<str>, bool)>,
    uncategorized: bool,
    uncategorized_column: Arc<str>,
}

impl ClassificationResult {
    /// Flag for a category or for the uncategorized column.
    pub fn get(&self, name: &str) -> Option<bool> {
        if name == self.uncategorized_column.as_ref() {
            return Some(self.uncategorized);
        }
        self.categories
            .iter()
            .find(|(category, _)| category.as_ref() == name)
            .map(|(_, matched)| *matched)
    }

    /// True exactly when no category fired.
    pub fn is_uncategorized(&self) -> bool {
        self.uncategorized
    }

    /// Names of the categories that fired, in column order.
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(|(_, matched)| *matched)
            .map(|(name, _)| name.as_ref())
    }

    /// Category flags in column order (uncategorized excluded).
    pub fn categories(&self) -> impl Iterator<Item = (&str, bool)> {
        self.categories
            .iter()
            .map(|(name, matched)| (name.as_ref(), *matched))
    }

    /// Every flag in output column order, uncategorized last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.categories()
            .chain(std::iter::once((self.uncategorized_column.as_ref(), self.uncategorized)))
    }

    /// Every flag as `0`/`1`, in output column order.
    pub fn indicators(&self) -> Vec<u8> {
        self.iter().map(|(_, flag)| u8::from(flag)).collect()
    }
}
