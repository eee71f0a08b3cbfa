use std::fs;

use tempfile::TempDir;

use rubrika::classify::{ClassifyOptions, Execution};
use rubrika::config::ClassifierConfig;
use rubrika::dataset::Value;
use rubrika::dataset::csv::{CsvReader, CsvWriter};
use rubrika::error::Result;

const INPUT: &str = "\u{feff}Номер;Отзыв;Оценка\n\
1;Спасибо, мастер быстро все сделал;5\n\
2;;3\n\
3;нормально;4\n\
4;Вопрос решен, сотрудники вежливые;5\n";

#[test]
fn csv_file_is_classified_end_to_end() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("feedback.csv");
    let output = dir.path().join("feedback_tagged.csv");
    fs::write(&input, INPUT)?;

    let mut dataset = CsvReader::new().with_delimiter(b';').read_path(&input)?;
    assert_eq!(dataset.columns()[0], "Номер");
    let text_column = dataset.detect_text_column().map(String::from);
    assert_eq!(text_column.as_deref(), Some("Отзыв"));

    let classifier = ClassifierConfig::default().build()?;
    let summary = classifier.classify_dataset(
        &mut dataset,
        "Отзыв",
        &ClassifyOptions::new().with_execution(Execution::parallel()),
    )?;
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.uncategorized, 2);
    assert_eq!(summary.count("Вопрос решен"), Some(1));

    CsvWriter::new()
        .with_delimiter(b';')
        .with_bom(true)
        .write_path(&dataset, &output)?;

    let bytes = fs::read(&output)?;
    assert!(bytes.starts_with("\u{feff}".as_bytes()));

    let reloaded = CsvReader::new().with_delimiter(b';').read_path(&output)?;
    assert_eq!(reloaded.width(), 3 + 6);
    assert_eq!(reloaded.get(1, "Отзыв"), Some(&Value::Null));
    assert_eq!(reloaded.get(0, "Оценка"), Some(&Value::Integer(5)));
    assert_eq!(
        reloaded.get(3, "Нравится качество работы сотрудников"),
        Some(&Value::Integer(1))
    );
    assert_eq!(reloaded.get(3, "Вопрос решен"), Some(&Value::Integer(1)));
    assert_eq!(reloaded.get(2, "Без категории"), Some(&Value::Integer(1)));
    Ok(())
}

#[test]
fn classifying_an_exported_file_again_changes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("feedback.csv");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    fs::write(&input, INPUT)?;

    let classifier = ClassifierConfig::default().build()?;
    let reader = CsvReader::new().with_delimiter(b';');
    let writer = CsvWriter::new().with_delimiter(b';');

    let mut dataset = reader.read_path(&input)?;
    classifier.classify_dataset(&mut dataset, "Отзыв", &ClassifyOptions::new())?;
    writer.write_path(&dataset, &first)?;

    let mut dataset = reader.read_path(&first)?;
    classifier.classify_dataset(&mut dataset, "Отзыв", &ClassifyOptions::new())?;
    writer.write_path(&dataset, &second)?;

    assert_eq!(fs::read_to_string(&first)?, fs::read_to_string(&second)?);
    Ok(())
}
