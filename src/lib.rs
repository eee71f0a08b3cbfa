//! # Rubrika
//!
//! Multi-label keyword classification of free-text customer comments.
//!
//! Every comment is lowercased, split on whitespace and reduced to base forms;
//! each configured category then fires when one of its trigger words appears
//! among the tokens. A dataset pass appends one `0`/`1` column per category
//! plus an "uncategorized" column.
//!
//! ## Modules
//!
//! - [`analysis`] - tokenizer, filters, lemmatizers and the [`analysis::normalizer::Normalizer`]
//! - [`category`] - category rules and the keyword matcher
//! - [`classify`] - classification passes, progress and cancellation
//! - [`dataset`] - in-memory tables and CSV input/output
//! - [`config`] - JSON configuration
//! - [`cli`] - the `rubrika` command line tool
//!
//! ```
//! use rubrika::classify::Classifier;
//!
//! let classifier = Classifier::builtin();
//! let result = classifier.classify_text(Some("Вопрос решен, спасибо"));
//! assert_eq!(result.get("Вопрос решен"), Some(true));
//! assert!(!result.is_uncategorized());
//! ```

pub mod analysis;
pub mod category;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;

pub mod prelude {
    pub use crate::category::{CategoryRule, CategorySet, ClassificationResult, MatchMode};
    pub use crate::classify::{Classifier, ClassifyOptions, Execution};
    pub use crate::config::ClassifierConfig;
    pub use crate::dataset::{Dataset, Value};
    pub use crate::error::{Result, RubrikaError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
