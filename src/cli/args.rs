//! Command line argument parsing for the rubrika CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Rubrika - multi-label keyword classifier for customer comments
#[derive(Parser, Debug, Clone)]
#[command(name = "rubrika")]
#[command(about = "Tag customer comments with keyword-based service categories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RubrikaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "RUBRIKA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RubrikaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify the comments of a CSV file
    Classify(ClassifyArgs),

    /// List the configured categories and their triggers
    Categories,

    /// List the columns of a CSV file
    Columns(ColumnsArgs),

    /// Show how a single comment is normalized and classified
    Normalize(NormalizeArgs),
}

/// Arguments for classifying a file
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Input CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Column holding the comment text (auto-detected when omitted)
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Field delimiter of both files
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Don't write a UTF-8 byte order mark
    #[arg(long)]
    pub no_bom: bool,

    /// Classify rows on all CPUs
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads (implies --parallel)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Show progress during classification
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for listing columns
#[derive(Parser, Debug, Clone)]
pub struct ColumnsArgs {
    /// Input CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

/// Arguments for normalizing a single comment
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Comment text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let value = match value {
        "\\t" | "tab" => "\t",
        other => other,
    };

    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{value}'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_args() {
        let args = RubrikaArgs::try_parse_from([
            "rubrika",
            "classify",
            "comments.csv",
            "-o",
            "tagged.csv",
            "--column",
            "Комментарий",
            "--delimiter",
            ";",
            "--threads",
            "4",
            "--no-bom",
        ])
        .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.input, PathBuf::from("comments.csv"));
            assert_eq!(classify_args.output, PathBuf::from("tagged.csv"));
            assert_eq!(classify_args.column.as_deref(), Some("Комментарий"));
            assert_eq!(classify_args.delimiter, b';');
            assert_eq!(classify_args.threads, Some(4));
            assert!(classify_args.no_bom);
            assert!(!classify_args.parallel);
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_classify_requires_output() {
        assert!(RubrikaArgs::try_parse_from(["rubrika", "classify", "in.csv"]).is_err());
    }

    #[test]
    fn test_delimiter_parsing() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("№").is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = RubrikaArgs::try_parse_from(["rubrika", "categories"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Verbose flag
        let args = RubrikaArgs::try_parse_from(["rubrika", "-v", "categories"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = RubrikaArgs::try_parse_from(["rubrika", "-vvv", "categories"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        // Quiet flag
        let args = RubrikaArgs::try_parse_from(["rubrika", "--quiet", "categories"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            RubrikaArgs::try_parse_from(["rubrika", "--format", "json", "--pretty", "categories"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }

    #[test]
    fn test_normalize_args() {
        let args = RubrikaArgs::try_parse_from(["rubrika", "normalize", "Вопрос решен"]).unwrap();

        if let Command::Normalize(normalize_args) = args.command {
            assert_eq!(normalize_args.text, "Вопрос решен");
        } else {
            panic!("Expected Normalize command");
        }
    }
}
