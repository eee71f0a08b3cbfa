//! Aggregate statistics of a finished pass.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::category::ClassificationResult;

/// Number of records that fired one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Outcome of classifying a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Column the comments were read from.
    pub text_column: String,
    /// Records classified.
    pub rows: usize,
    /// Per-category hit counts, in output column order.
    pub categories: Vec<CategoryCount>,
    /// Name of the uncategorized column.
    pub uncategorized_column: String,
    /// Records with no category.
    pub uncategorized: usize,
    /// Output columns that already existed and were replaced.
    pub replaced_columns: usize,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
}

impl ClassificationSummary {
    pub(crate) fn from_results(
        text_column: &str,
        category_names: &[String],
        uncategorized_column: &str,
        results: &[ClassificationResult],
        replaced_columns: usize,
        elapsed: Duration,
    ) -> Self {
        let mut counts = vec![0usize; category_names.len()];
        let mut uncategorized = 0;

        for result in results {
            for (count, (_, matched)) in counts.iter_mut().zip(result.categories()) {
                *count += usize::from(matched);
            }
            uncategorized += usize::from(result.is_uncategorized());
        }

        ClassificationSummary {
            text_column: text_column.to_string(),
            rows: results.len(),
            categories: category_names
                .iter()
                .zip(counts)
                .map(|(name, count)| CategoryCount {
                    name: name.clone(),
                    count,
                })
                .collect(),
            uncategorized_column: uncategorized_column.to_string(),
            uncategorized,
            replaced_columns,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    /// Records with at least one category.
    pub fn categorized(&self) -> usize {
        self.rows - self.uncategorized
    }

    /// Hit count of a category or of the uncategorized column.
    pub fn count(&self, name: &str) -> Option<usize> {
        if name == self.uncategorized_column {
            return Some(self.uncategorized);
        }
        self.categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.count)
    }
}
