//! Output formatting for CLI commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::CategorySet;
use crate::classify::ClassificationSummary;
use crate::cli::args::{OutputFormat, RubrikaArgs};
use crate::error::Result;

/// Triggers shown per category before the listing is cut short.
const TRIGGER_PREVIEW: usize = 10;

/// Result of the `classify` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyReport {
    pub input: String,
    pub output: String,
    #[serde(flatten)]
    pub summary: ClassificationSummary,
}

impl ClassifyReport {
    pub fn new(input: &Path, output: &Path, summary: ClassificationSummary) -> Self {
        ClassifyReport {
            input: input.display().to_string(),
            output: output.display().to_string(),
            summary,
        }
    }
}

/// One category in the `categories` listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub trigger_count: usize,
    pub triggers: Vec<String>,
}

/// Result of the `categories` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListing {
    pub categories: Vec<CategoryInfo>,
    pub uncategorized_column: String,
}

impl From<&CategorySet> for CategoryListing {
    fn from(set: &CategorySet) -> Self {
        CategoryListing {
            categories: set
                .iter()
                .map(|rule| CategoryInfo {
                    name: rule.name.clone(),
                    trigger_count: rule.triggers.len(),
                    triggers: rule.triggers.clone(),
                })
                .collect(),
            uncategorized_column: set.uncategorized_column().to_string(),
        }
    }
}

/// Result of the `columns` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ColumnListing {
    pub columns: Vec<String>,
    pub rows: usize,
    pub text_column: Option<String>,
}

/// Result of the `normalize` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub text: String,
    pub tokens: Vec<String>,
    pub categories: Vec<String>,
    pub uncategorized: bool,
}

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

impl HumanOutput for ClassifyReport {
    fn render_human(&self) -> String {
        let summary = &self.summary;
        let mut out = format!(
            "Input:  {}\nOutput: {}\nText column: {}\nRows: {} ({} categorized, {} uncategorized)\n",
            self.input,
            self.output,
            summary.text_column,
            summary.rows,
            summary.categorized(),
            summary.uncategorized
        );

        out.push('\n');
        for category in &summary.categories {
            out.push_str(&format!("  {:>6}  {}\n", category.count, category.name));
        }
        out.push_str(&format!(
            "  {:>6}  {}\n",
            summary.uncategorized, summary.uncategorized_column
        ));

        if summary.replaced_columns > 0 {
            out.push_str(&format!(
                "\nReplaced {} existing output columns\n",
                summary.replaced_columns
            ));
        }
        out.push_str(&format!("\nTime: {}ms\n", summary.elapsed_ms));
        out
    }
}

impl HumanOutput for CategoryListing {
    fn render_human(&self) -> String {
        let mut out = String::new();

        for category in &self.categories {
            out.push_str(&format!("{}\n", category.name));

            let preview: Vec<&str> = category
                .triggers
                .iter()
                .take(TRIGGER_PREVIEW)
                .map(String::as_str)
                .collect();
            out.push_str(&format!("  {}", preview.join(", ")));

            let hidden = category.trigger_count.saturating_sub(TRIGGER_PREVIEW);
            if hidden > 0 {
                out.push_str(&format!(" and {hidden} more"));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "\nUncategorized column: {}\n",
            self.uncategorized_column
        ));
        out
    }
}

impl HumanOutput for ColumnListing {
    fn render_human(&self) -> String {
        let mut out = format!("{} columns, {} rows\n", self.columns.len(), self.rows);
        for column in &self.columns {
            let marker = if self.text_column.as_deref() == Some(column.as_str()) {
                "  <- text"
            } else {
                ""
            };
            out.push_str(&format!("  {column}{marker}\n"));
        }
        out
    }
}

impl HumanOutput for NormalizeReport {
    fn render_human(&self) -> String {
        let mut out = format!("Tokens: {}\n", self.tokens.join(" "));
        if self.uncategorized {
            out.push_str("Categories: none\n");
        } else {
            out.push_str("Categories:\n");
            for category in &self.categories {
                out.push_str(&format!("  {category}\n"));
            }
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &RubrikaArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &RubrikaArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &RubrikaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryRule;

    #[test]
    fn test_category_listing_preview() {
        let set = CategorySet::new(vec![
            CategoryRule::new("Много", (0..12).map(|i| format!("t{i}"))),
            CategoryRule::new("Мало", ["a", "b"]),
        ])
        .unwrap();

        let text = CategoryListing::from(&set).render_human();

        assert!(text.contains("t0, t1, t2, t3, t4, t5, t6, t7, t8, t9 and 2 more"));
        assert!(!text.contains("t10"));
        assert!(text.contains("  a, b\n"));
        assert!(text.contains("Uncategorized column: Без категории"));
    }

    #[test]
    fn test_column_listing_marks_text_column() {
        let listing = ColumnListing {
            columns: vec!["id".to_string(), "comment".to_string()],
            rows: 3,
            text_column: Some("comment".to_string()),
        };

        let text = listing.render_human();
        assert!(text.starts_with("2 columns, 3 rows"));
        assert!(text.contains("  comment  <- text\n"));
        assert!(text.contains("  id\n"));
    }

    #[test]
    fn test_normalize_report() {
        let report = NormalizeReport {
            text: "нормально".to_string(),
            tokens: vec!["нормально".to_string()],
            categories: Vec::new(),
            uncategorized: true,
        };
        assert_eq!(report.render_human(), "Tokens: нормально\nCategories: none\n");
    }
}
