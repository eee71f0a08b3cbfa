//! In-memory table with named, ordered columns.

use ahash::AHashSet;

use crate::dataset::value::Value;
use crate::error::{Result, RubrikaError};

/// Substrings that mark a column as likely holding free-text comments.
const TEXT_COLUMN_HINTS: &[&str] = &["text", "comment", "review", "отзыв", "комментарий"];

/// An ordered sequence of rows sharing one column list.
///
/// Rows can be added but never reordered or removed; columns can be appended
/// or dropped. Every row always has exactly one value per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = AHashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(RubrikaError::dataset(format!(
                    "Duplicate column name '{column}'"
                )));
            }
        }

        Ok(Dataset {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a dataset and fill it with rows.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new(columns)?;
        dataset.rows.reserve(rows.len());
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Append a row; it must have one value per column.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(RubrikaError::dataset(format!(
                "Row {} has {} values, expected {}",
                self.rows.len(),
                values.len(),
                self.columns.len()
            )));
        }
        self.rows.push(values);
        Ok(())
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// A single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|values| &values[index])
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|values| &values[index]).collect())
    }

    /// A read-only view of one row.
    pub fn record(&self, row: usize) -> Option<Record<'_>> {
        self.rows.get(row).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate rows as records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Drop every listed column that exists; returns how many were dropped.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let doomed: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| names.iter().any(|name| name.as_ref() == column.as_str()))
            .map(|(index, _)| index)
            .collect();

        if doomed.is_empty() {
            return 0;
        }

        let keep = |index: usize| doomed.binary_search(&index).is_err();

        self.columns = std::mem::take(&mut self.columns)
            .into_iter()
            .enumerate()
            .filter(|(index, _)| keep(*index))
            .map(|(_, column)| column)
            .collect();

        for row in &mut self.rows {
            *row = std::mem::take(row)
                .into_iter()
                .enumerate()
                .filter(|(index, _)| keep(*index))
                .map(|(_, value)| value)
                .collect();
        }

        doomed.len()
    }

    /// Append a column after the existing ones.
    pub fn append_column<S: Into<String>>(&mut self, name: S, values: Vec<Value>) -> Result<()> {
        let name = name.into();

        if self.has_column(&name) {
            return Err(RubrikaError::dataset(format!(
                "Column '{name}' already exists"
            )));
        }
        if values.len() != self.rows.len() {
            return Err(RubrikaError::dataset(format!(
                "Column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.rows.len()
            )));
        }

        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Best guess at the column holding comment text.
    ///
    /// Picks the first column whose lowercased name contains a comment-like
    /// word ("text", "comment", "review", "отзыв", "комментарий"); otherwise
    /// the first column.
    pub fn detect_text_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| {
                let lowered = column.to_lowercase();
                TEXT_COLUMN_HINTS.iter().any(|hint| lowered.contains(hint))
            })
            .or_else(|| self.columns.first())
            .map(String::as_str)
    }
}

/// A read-only view of one dataset row as an ordered column → value mapping.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Value of a column.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| &self.values[index])
    }

    /// Values in column order.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            ["id", "Комментарий", "score"],
            vec![
                vec![Value::Integer(1), Value::from("спасибо"), Value::Float(4.5)],
                vec![Value::Integer(2), Value::Null, Value::Float(3.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_basic_access() {
        let dataset = sample();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.width(), 3);
        assert_eq!(dataset.column_index("score"), Some(2));
        assert_eq!(dataset.get(0, "Комментарий"), Some(&Value::from("спасибо")));
        assert_eq!(dataset.get(1, "Комментарий"), Some(&Value::Null));
        assert_eq!(dataset.get(5, "id"), None);
        assert_eq!(dataset.get(0, "missing"), None);
    }

    #[test]
    fn test_records() {
        let dataset = sample();
        let record = dataset.record(0).unwrap();

        assert_eq!(record.get("id"), Some(&Value::Integer(1)));
        assert_eq!(record.len(), 3);
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "Комментарий", "score"]);
        assert_eq!(dataset.records().count(), 2);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        assert!(Dataset::new(["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_row_width_checked() {
        let mut dataset = Dataset::new(["a", "b"]).unwrap();
        assert!(dataset.push_row(vec![Value::Null]).is_err());
        assert!(dataset.push_row(vec![Value::Null, Value::Null]).is_ok());
    }

    #[test]
    fn test_drop_columns() {
        let mut dataset = sample();
        let dropped = dataset.drop_columns(&["id", "score", "absent"]);

        assert_eq!(dropped, 2);
        assert_eq!(dataset.columns(), &["Комментарий".to_string()]);
        assert_eq!(dataset.record(1).unwrap().values(), &[Value::Null]);
        assert_eq!(dataset.drop_columns(&["absent"]), 0);
    }

    #[test]
    fn test_append_column() {
        let mut dataset = sample();
        dataset
            .append_column("flag", vec![Value::indicator(true), Value::indicator(false)])
            .unwrap();

        assert_eq!(dataset.columns().last().unwrap(), "flag");
        assert_eq!(dataset.get(1, "flag"), Some(&Value::Integer(0)));

        assert!(dataset.append_column("flag", vec![Value::Null, Value::Null]).is_err());
        assert!(dataset.append_column("short", vec![Value::Null]).is_err());
    }

    #[test]
    fn test_detect_text_column() {
        assert_eq!(sample().detect_text_column(), Some("Комментарий"));

        let dataset = Dataset::new(["id", "Review text"]).unwrap();
        assert_eq!(dataset.detect_text_column(), Some("Review text"));

        let dataset = Dataset::new(["id", "body"]).unwrap();
        assert_eq!(dataset.detect_text_column(), Some("id"));

        let dataset = Dataset::new(Vec::<String>::new()).unwrap();
        assert_eq!(dataset.detect_text_column(), None);
    }
}
