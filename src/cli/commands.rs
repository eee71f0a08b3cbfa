//! Command implementations for the rubrika CLI.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use crossbeam_channel::Receiver;
use log::{debug, info};

use crate::classify::{ChannelProgress, ClassifyOptions, Execution, ProgressEvent};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;
use crate::dataset::csv::{CsvReader, CsvWriter};
use crate::error::{Result, RubrikaError};

/// Execute a CLI command.
pub fn execute_command(args: RubrikaArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify_file(classify_args, &args),
        Command::Categories => list_categories(&args),
        Command::Columns(columns_args) => list_columns(columns_args, &args),
        Command::Normalize(normalize_args) => normalize_text(normalize_args, &args),
    }
}

/// The configuration named on the command line, or the default one.
fn load_config(cli_args: &RubrikaArgs) -> Result<ClassifierConfig> {
    match &cli_args.config {
        Some(path) => {
            info!("Using configuration {}", path.display());
            ClassifierConfig::load(path)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

/// Classify the comments of a CSV file and write the tagged copy.
fn classify_file(args: &ClassifyArgs, cli_args: &RubrikaArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let classifier = config.build()?;

    let mut dataset = CsvReader::new()
        .with_delimiter(args.delimiter)
        .read_path(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;

    let text_column = match &args.column {
        Some(column) => column.clone(),
        None => {
            let detected = dataset
                .detect_text_column()
                .ok_or_else(|| RubrikaError::configuration("Input file has no columns"))?;
            info!("Detected text column '{detected}'");
            detected.to_string()
        }
    };

    let execution = match (args.threads, args.parallel) {
        (Some(threads), _) => Execution::with_threads(threads),
        (None, true) => Execution::parallel(),
        (None, false) => config.execution(),
    };
    debug!("Execution strategy: {execution:?}");

    let mut options = ClassifyOptions::new().with_execution(execution);
    let mut printer = None;
    if args.progress {
        let (reporter, events) = ChannelProgress::new();
        options = options.with_progress(Arc::new(reporter));
        printer = Some(thread::spawn(move || print_progress(events)));
    }

    let outcome = classifier.classify_dataset(&mut dataset, &text_column, &options);

    // The printer stops once the last sender is gone.
    drop(options);
    if let Some(printer) = printer {
        let _ = printer.join();
    }
    let summary = outcome?;

    CsvWriter::new()
        .with_delimiter(args.delimiter)
        .with_bom(!args.no_bom)
        .write_path(&dataset, &args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    output_result(
        "Classification finished",
        &ClassifyReport::new(&args.input, &args.output, summary),
        cli_args,
    )
}

fn print_progress(events: Receiver<ProgressEvent>) {
    let mut stderr = std::io::stderr();
    for event in events {
        match event {
            ProgressEvent::Started { total } => {
                let _ = write!(stderr, "Classifying {total} records...");
            }
            ProgressEvent::Advanced { completed, total } => {
                let _ = write!(stderr, "\rClassified {completed}/{total} records");
            }
            ProgressEvent::Finished { total } => {
                let _ = writeln!(stderr, "\rClassified {total}/{total} records");
            }
        }
        let _ = stderr.flush();
    }
}

/// List the configured categories.
fn list_categories(cli_args: &RubrikaArgs) -> Result<()> {
    let categories = load_config(cli_args)?.category_set()?;

    output_result(
        "Configured categories",
        &CategoryListing::from(&categories),
        cli_args,
    )
}

/// List the columns of a CSV file.
fn list_columns(args: &ColumnsArgs, cli_args: &RubrikaArgs) -> Result<()> {
    let dataset = CsvReader::new()
        .with_delimiter(args.delimiter)
        .read_path(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;

    let listing = ColumnListing {
        columns: dataset.columns().to_vec(),
        rows: dataset.len(),
        text_column: dataset.detect_text_column().map(String::from),
    };

    output_result(
        &format!("Columns of {}", args.input.display()),
        &listing,
        cli_args,
    )
}

/// Normalize one comment and show which categories fire.
fn normalize_text(args: &NormalizeArgs, cli_args: &RubrikaArgs) -> Result<()> {
    let classifier = load_config(cli_args)?.build()?;

    let tokens = classifier.normalizer().normalize(Some(&args.text));
    let result = classifier.matcher().classify(&tokens);

    let report = NormalizeReport {
        text: args.text.clone(),
        tokens,
        categories: result.matched().map(String::from).collect(),
        uncategorized: result.is_uncategorized(),
    };

    output_result("Normalized text", &report, cli_args)
}
