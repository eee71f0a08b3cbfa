//! Category rules and the keyword matcher that evaluates them.
//!
//! - [`CategoryRule`] / [`CategorySet`]: the validated, ordered configuration
//! - [`CategoryMatcher`]: the compiled, immutable evaluator
//! - [`ClassificationResult`]: per-record flags plus the uncategorized flag

pub mod defaults;
pub mod matcher;
pub mod rule;

pub use matcher::{CategoryMatcher, ClassificationResult, MatchMode, MatcherOptions};
pub use rule::{CategoryRule, CategorySet, DEFAULT_UNCATEGORIZED_COLUMN};
