//! CSV loading and export for datasets.
//!
//! The first row holds the column names; every following row becomes one
//! dataset row:
//! ```csv
//! id,comment,rating
//! 1,"Спасибо, мастер быстро все сделал",5
//! 2,,3
//! ```
//!
//! Types are inferred per column, not per cell: a column is boolean, integer
//! or float only when every non-missing cell parses as such, otherwise it is
//! text. This keeps a comment like `"5"` a string inside a text column.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;

use crate::dataset::table::Dataset;
use crate::dataset::value::Value;
use crate::error::{Result, RubrikaError};

const UTF8_BOM: &str = "\u{feff}";

/// Cell contents treated as missing values, the same set pandas uses.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Boolean,
    Integer,
    Float,
    Text,
}

/// Reads delimited text into a [`Dataset`].
#[derive(Debug, Clone)]
pub struct CsvReader {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
    /// Whether to allow rows with differing field counts
    flexible: bool,
    /// Whether to infer non-text column types
    infer_types: bool,
    /// Cell contents treated as missing
    null_values: Vec<String>,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReader {
    /// Create a reader with comma delimiter and type inference.
    pub fn new() -> Self {
        CsvReader {
            delimiter: b',',
            trim: false,
            flexible: false,
            infer_types: true,
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Allow short rows; missing trailing cells become nulls and extra cells
    /// are ignored.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    /// Set whether to infer boolean/integer/float columns.
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Replace the set of cell contents treated as missing.
    pub fn with_null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Read a CSV file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = self.read_from(file)?;
        debug!(
            "Loaded {} rows x {} columns from {}",
            dataset.len(),
            dataset.width(),
            path.display()
        );
        Ok(dataset)
    }

    /// Read CSV from a string.
    pub fn read_str(&self, input: &str) -> Result<Dataset> {
        self.read_from(input.as_bytes())
    }

    /// Read CSV from any reader.
    pub fn read_from<R: Read>(&self, input: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(self.flexible)
            .from_reader(input);

        let headers: Vec<&str> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(index, header)| {
                if index == 0 {
                    header.trim_start_matches(UTF8_BOM)
                } else {
                    header
                }
            })
            .collect();
        if headers.iter().all(|header| header.is_empty()) {
            return Err(RubrikaError::dataset("CSV header is empty"));
        }
        let headers = dedup_headers(&headers);

        let width = headers.len();
        let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = (0..width)
                .map(|index| {
                    record
                        .get(index)
                        .filter(|cell| !self.is_null(cell))
                        .map(str::to_string)
                })
                .collect();
            raw_rows.push(row);
        }

        let types: Vec<ColumnType> = (0..width)
            .map(|index| {
                if self.infer_types {
                    infer_column_type(raw_rows.iter().filter_map(|row| row[index].as_deref()))
                } else {
                    ColumnType::Text
                }
            })
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&types)
                    .map(|(cell, column_type)| match cell {
                        Some(cell) => convert_cell(cell, *column_type),
                        None => Value::Null,
                    })
                    .collect()
            })
            .collect();

        Dataset::from_rows(headers, rows)
    }

    fn is_null(&self, cell: &str) -> bool {
        self.null_values.iter().any(|null| null == cell)
    }
}

/// Rename repeated header names to `name.1`, `name.2`, ... skipping names
/// already taken, so every column stays addressable.
fn dedup_headers(headers: &[&str]) -> Vec<String> {
    let mut taken: AHashSet<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut counters: AHashMap<&str, usize> = AHashMap::new();

    headers
        .iter()
        .map(|&header| {
            if seen.insert(header) {
                return header.to_string();
            }
            let counter = counters.entry(header).or_insert(0);
            loop {
                *counter += 1;
                let candidate = format!("{header}.{counter}");
                if taken.insert(candidate.clone()) {
                    debug!("Renamed duplicate column '{header}' to '{candidate}'");
                    return candidate;
                }
            }
        })
        .collect()
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: Iterator<Item = &'a str> + Clone,
{
    let mut cells = cells.peekable();
    if cells.peek().is_none() {
        return ColumnType::Text;
    }

    if cells.clone().all(|cell| parse_bool(cell).is_some()) {
        ColumnType::Boolean
    } else if cells.clone().all(|cell| cell.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if cells.all(|cell| cell.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn convert_cell(cell: String, column_type: ColumnType) -> Value {
    let converted = match column_type {
        ColumnType::Boolean => parse_bool(&cell).map(Value::Boolean),
        ColumnType::Integer => cell.parse::<i64>().ok().map(Value::Integer),
        ColumnType::Float => cell.parse::<f64>().ok().map(Value::Float),
        ColumnType::Text => None,
    };
    converted.unwrap_or(Value::Text(cell))
}

/// Writes a [`Dataset`] as delimited text.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
    bom: bool,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvWriter {
    /// Create a writer with comma delimiter and no BOM.
    pub fn new() -> Self {
        CsvWriter {
            delimiter: b',',
            bom: false,
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Prefix the output with a UTF-8 byte order mark, which spreadsheet
    /// tools need to detect Cyrillic text correctly.
    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    /// Write a dataset to a file, replacing it.
    pub fn write_path<P: AsRef<Path>>(&self, dataset: &Dataset, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_to(dataset, File::create(path)?)?;
        debug!("Wrote {} rows to {}", dataset.len(), path.display());
        Ok(())
    }

    /// Write a dataset into a string.
    pub fn write_string(&self, dataset: &Dataset) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(dataset, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| RubrikaError::internal(e.to_string()))
    }

    /// Write a dataset to any writer.
    pub fn write_to<W: Write>(&self, dataset: &Dataset, mut output: W) -> Result<()> {
        if self.bom {
            output.write_all(UTF8_BOM.as_bytes())?;
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(output);

        writer.write_record(dataset.columns())?;
        for record in dataset.records() {
            writer.write_record(record.values().iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}
