//! Dataset classification pass.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::analysis::normalizer::Normalizer;
use crate::category::{CategoryMatcher, CategorySet, ClassificationResult, MatcherOptions};
use crate::classify::options::ClassifyOptions;
use crate::classify::summary::ClassificationSummary;
use crate::dataset::{Dataset, Value};
use crate::error::{Result, RubrikaError};

/// Normalizes comments and flags them with every matching category.
///
/// The compiled matcher sits behind a lock so that [`Classifier::replace_rules`]
/// can swap category rules at runtime. A pass takes a snapshot of the matcher
/// when it starts; a replacement only affects passes started afterwards.
///
/// # Examples
///
/// ```
/// use rubrika::classify::{Classifier, ClassifyOptions};
/// use rubrika::dataset::{Dataset, Value};
///
/// let classifier = Classifier::builtin();
/// let mut dataset = Dataset::from_rows(
///     ["comment"],
///     vec![vec![Value::from("Спасибо, мастер быстро все сделал")], vec![Value::Null]],
/// ).unwrap();
///
/// let summary = classifier
///     .classify_dataset(&mut dataset, "comment", &ClassifyOptions::new())
///     .unwrap();
/// assert_eq!(summary.rows, 2);
/// assert_eq!(dataset.get(1, "Без категории"), Some(&Value::Integer(1)));
/// ```
#[derive(Debug)]
pub struct Classifier {
    normalizer: Arc<Normalizer>,
    options: MatcherOptions,
    matcher: RwLock<Arc<CategoryMatcher>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Classifier {
    /// Classifier for `categories` using the default normalizer.
    pub fn new(categories: &CategorySet) -> Self {
        Self::with_normalizer(categories, Normalizer::new(), MatcherOptions::default())
    }

    /// Classifier for the built-in service categories.
    pub fn builtin() -> Self {
        Self::new(&CategorySet::builtin())
    }

    /// Classifier with an explicit normalizer and matcher options.
    pub fn with_normalizer(
        categories: &CategorySet,
        normalizer: Normalizer,
        options: MatcherOptions,
    ) -> Self {
        let matcher = CategoryMatcher::with_options(categories, options, &normalizer);
        Classifier {
            normalizer: Arc::new(normalizer),
            options,
            matcher: RwLock::new(Arc::new(matcher)),
        }
    }

    /// The normalizer applied to every comment.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Snapshot of the current matcher.
    pub fn matcher(&self) -> Arc<CategoryMatcher> {
        Arc::clone(&self.matcher.read())
    }

    /// Swap in a new rule set; passes already running keep the old one.
    pub fn replace_rules(&self, categories: &CategorySet) {
        let matcher = CategoryMatcher::with_options(categories, self.options, &self.normalizer);
        info!(
            "Replacing category rules: {} categories, uncategorized column '{}'",
            matcher.len(),
            matcher.uncategorized_column()
        );
        *self.matcher.write() = Arc::new(matcher);
    }

    /// Columns a pass appends, in order.
    pub fn output_columns(&self) -> Vec<String> {
        self.matcher().output_columns()
    }

    /// Classify a single comment; `None` means a missing value.
    pub fn classify_text(&self, text: Option<&str>) -> ClassificationResult {
        self.matcher().classify(&self.normalizer.normalize(text))
    }

    /// Classify a single cell; non-text cells are treated as missing.
    pub fn classify_value(&self, value: &Value) -> ClassificationResult {
        self.matcher().classify(&self.normalizer.normalize_value(value))
    }

    /// Classify a batch of comments, one result per input in input order.
    pub fn classify_texts<S>(
        &self,
        texts: &[Option<S>],
        options: &ClassifyOptions,
    ) -> Result<Vec<ClassificationResult>>
    where
        S: AsRef<str> + Sync,
    {
        let matcher = self.matcher();
        self.run(&matcher, texts, |text| text.as_ref().map(S::as_ref), options)
    }

    /// Classify a batch of cells, one result per input in input order.
    pub fn classify_values(
        &self,
        values: &[Value],
        options: &ClassifyOptions,
    ) -> Result<Vec<ClassificationResult>> {
        let matcher = self.matcher();
        self.run(&matcher, values, Value::as_text, options)
    }

    /// Classify every row of `dataset` by its `text_column`.
    ///
    /// Existing output columns are dropped and one `0`/`1` column per
    /// category is appended, followed by the uncategorized column. Rows keep
    /// their order. Running the pass twice yields the same table as running
    /// it once.
    ///
    /// The dataset is modified only after every row was classified: a pass
    /// that fails or is cancelled leaves it untouched.
    pub fn classify_dataset(
        &self,
        dataset: &mut Dataset,
        text_column: &str,
        options: &ClassifyOptions,
    ) -> Result<ClassificationSummary> {
        let start = Instant::now();
        let matcher = self.matcher();

        if matcher.is_empty() {
            return Err(RubrikaError::configuration("No category rules configured"));
        }

        let output_columns = matcher.output_columns();
        if output_columns.iter().any(|column| column == text_column) {
            return Err(RubrikaError::configuration(format!(
                "Text column '{text_column}' clashes with an output column"
            )));
        }

        let results = {
            let values = dataset.column_values(text_column).ok_or_else(|| {
                RubrikaError::configuration(format!(
                    "Text column '{}' not found; available columns: {}",
                    text_column,
                    dataset.columns().join(", ")
                ))
            })?;

            debug!(
                "Classifying {} rows from column '{}' ({:?})",
                values.len(),
                text_column,
                options.execution
            );
            self.run(&matcher, &values, |value| value.as_text(), options)?
        };

        let replaced = dataset.drop_columns(&output_columns);
        if replaced > 0 {
            debug!("Dropped {replaced} existing output columns");
        }

        let mut columns: Vec<Vec<Value>> = output_columns
            .iter()
            .map(|_| Vec::with_capacity(results.len()))
            .collect();
        for result in &results {
            for (column, (_, flag)) in columns.iter_mut().zip(result.iter()) {
                column.push(Value::indicator(flag));
            }
        }
        for (name, values) in output_columns.iter().zip(columns) {
            dataset.append_column(name.as_str(), values)?;
        }

        let category_names: Vec<String> = matcher.category_names().map(String::from).collect();
        let summary = ClassificationSummary::from_results(
            text_column,
            &category_names,
            matcher.uncategorized_column(),
            &results,
            replaced,
            start.elapsed(),
        );

        info!(
            "Classified {} rows: {} categorized, {} uncategorized in {}ms",
            summary.rows,
            summary.categorized(),
            summary.uncategorized,
            summary.elapsed_ms
        );

        Ok(summary)
    }

    fn run<T, F>(
        &self,
        matcher: &CategoryMatcher,
        items: &[T],
        text: F,
        options: &ClassifyOptions,
    ) -> Result<Vec<ClassificationResult>>
    where
        T: Sync,
        F: Fn(&T) -> Option<&str> + Sync,
    {
        let total = items.len();
        let progress = options.progress();
        let classify = |item: &T| matcher.classify(&self.normalizer.normalize(text(item)));
        let cancelled = |completed: usize| {
            RubrikaError::cancelled(format!(
                "Classification cancelled after {completed} of {total} records"
            ))
        };

        let pool = options.execution.thread_pool()?;
        progress.on_start(total);

        let results = if options.execution.is_parallel() {
            let completed = AtomicUsize::new(0);
            let job = || {
                items
                    .par_iter()
                    .map(|item| {
                        if options.is_cancelled() {
                            return Err(cancelled(completed.load(Ordering::Acquire)));
                        }
                        let result = classify(item);
                        let done = completed.fetch_add(1, Ordering::AcqRel) + 1;
                        progress.on_record(done, total);
                        Ok(result)
                    })
                    .collect::<Result<Vec<_>>>()
            };

            match pool {
                Some(pool) => pool.install(job)?,
                None => job()?,
            }
        } else {
            let mut results = Vec::with_capacity(total);
            for (index, item) in items.iter().enumerate() {
                if options.is_cancelled() {
                    return Err(cancelled(index));
                }
                results.push(classify(item));
                progress.on_record(index + 1, total);
            }
            results
        };

        progress.on_finish(total);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryRule;
    use crate::classify::options::Execution;
    use crate::classify::progress::{CancellationToken, ChannelProgress, ProgressCounter};

    fn comments() -> Dataset {
        Dataset::from_rows(
            ["id", "comment"],
            vec![
                vec![Value::Integer(1), Value::from("Спасибо, мастер быстро все сделал")],
                vec![Value::Integer(2), Value::Null],
                vec![Value::Integer(3), Value::from("нормально")],
                vec![Value::Integer(4), Value::from("вопрос решен быстро")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_classify_text() {
        let classifier = Classifier::builtin();
        let result = classifier.classify_text(Some("Спасибо, мастер быстро все сделал"));

        assert_eq!(result.indicators(), vec![1, 0, 1, 1, 0, 0]);
        assert!(classifier.classify_text(None).is_uncategorized());
        assert!(classifier.classify_value(&Value::Integer(7)).is_uncategorized());
    }

    #[test]
    fn test_classify_dataset_appends_columns() {
        let classifier = Classifier::builtin();
        let mut dataset = comments();

        let summary = classifier
            .classify_dataset(&mut dataset, "comment", &ClassifyOptions::new())
            .unwrap();

        assert_eq!(summary.rows, 4);
        assert_eq!(summary.replaced_columns, 0);
        assert_eq!(dataset.width(), 2 + 6);
        assert_eq!(&dataset.columns()[2..], classifier.output_columns().as_slice());
        assert_eq!(dataset.get(1, "Без категории"), Some(&Value::Integer(1)));
        assert_eq!(dataset.get(2, "Без категории"), Some(&Value::Integer(1)));
        assert_eq!(
            dataset.get(3, "Вопрос решен"),
            Some(&Value::Integer(1))
        );
        assert_eq!(summary.uncategorized, 2);
        assert_eq!(summary.categorized(), 2);
    }

    #[test]
    fn test_classify_dataset_is_idempotent() {
        let classifier = Classifier::builtin();
        let mut once = comments();
        classifier
            .classify_dataset(&mut once, "comment", &ClassifyOptions::new())
            .unwrap();

        let mut twice = once.clone();
        let summary = classifier
            .classify_dataset(&mut twice, "comment", &ClassifyOptions::new())
            .unwrap();

        assert_eq!(summary.replaced_columns, 6);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let classifier = Classifier::builtin();
        let mut dataset = comments();
        let before = dataset.clone();

        let err = classifier
            .classify_dataset(&mut dataset, "missing", &ClassifyOptions::new())
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_text_column_clash_rejected() {
        let classifier = Classifier::builtin();
        let mut dataset = Dataset::from_rows(
            ["Вопрос решен"],
            vec![vec![Value::from("вопрос решен")]],
        )
        .unwrap();

        let err = classifier
            .classify_dataset(&mut dataset, "Вопрос решен", &ClassifyOptions::new())
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let classifier = Classifier::builtin();
        let mut sequential = comments();
        let mut parallel = comments();

        classifier
            .classify_dataset(&mut sequential, "comment", &ClassifyOptions::new())
            .unwrap();
        classifier
            .classify_dataset(
                &mut parallel,
                "comment",
                &ClassifyOptions::new().with_execution(Execution::with_threads(2)),
            )
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_progress_and_cancellation() {
        let classifier = Classifier::builtin();
        let counter = Arc::new(ProgressCounter::new());
        let options = ClassifyOptions::new().with_progress(counter.clone());

        let mut dataset = comments();
        classifier
            .classify_dataset(&mut dataset, "comment", &options)
            .unwrap();
        assert_eq!(counter.completed(), 4);
        assert!(counter.is_finished());

        let token = CancellationToken::new();
        token.cancel();
        let mut dataset = comments();
        let before = dataset.clone();
        let err = classifier
            .classify_dataset(
                &mut dataset,
                "comment",
                &ClassifyOptions::new().with_cancellation(token),
            )
            .unwrap_err();

        assert!(matches!(err, RubrikaError::OperationCancelled(_)));
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_rejected_pool_reports_no_progress() {
        let classifier = Classifier::builtin();
        let (reporter, events) = ChannelProgress::new();
        let options = ClassifyOptions::new()
            .with_execution(Execution::with_threads(0))
            .with_progress(Arc::new(reporter));

        let mut dataset = comments();
        let before = dataset.clone();
        let err = classifier
            .classify_dataset(&mut dataset, "comment", &options)
            .unwrap_err();
        drop(options);

        assert!(err.is_configuration());
        assert_eq!(events.try_iter().count(), 0);
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_replace_rules() {
        let classifier = Classifier::builtin();
        let before = classifier.matcher();

        let rules = CategorySet::new(vec![CategoryRule::new("Норма", ["нормально"])]).unwrap();
        classifier.replace_rules(&rules);

        assert_eq!(before.len(), 5);
        assert_eq!(classifier.output_columns(), vec!["Норма", "Без категории"]);
        let result = classifier.classify_text(Some("нормально"));
        assert_eq!(result.get("Норма"), Some(true));
        assert!(!result.is_uncategorized());
    }

    #[test]
    fn test_classify_texts_preserves_order() {
        let classifier = Classifier::builtin();
        let texts = vec![Some("вопрос решен"), None, Some("спасибо")];

        let results = classifier
            .classify_texts(
                &texts,
                &ClassifyOptions::new().with_execution(Execution::parallel()),
            )
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].get("Вопрос решен"), Some(true));
        assert!(results[1].is_uncategorized());
        assert!(!results[2].is_uncategorized());
    }
}
