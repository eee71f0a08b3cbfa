//! Tabular data: the rows a classification pass reads and augments.
//!
//! - [`value::Value`] - a single typed cell
//! - [`table::Dataset`] / [`table::Record`] - the table and read-only row views
//! - [`csv`] - loading and exporting delimited files

pub mod csv;
pub mod table;
pub mod value;

pub use table::{Dataset, Record};
pub use value::Value;
