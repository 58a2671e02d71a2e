//! CSV record loader.
//!
//! The first row is the header. The text and label columns are located by
//! name, so extra columns (such as an exported index) are ignored:
//!
//! ```csv
//! ,text,sentiment
//! 0,Stay home and stay safe everyone,joy
//! 1,Scared for my parents right now,fear
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::data::label::Emotion;
use crate::error::{Result, SentimentError};

/// One labelled post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Raw post text.
    pub text: String,
    /// Emotion label.
    pub sentiment: Emotion,
}

impl Record {
    /// Create a new record.
    pub fn new<S: Into<String>>(text: S, sentiment: Emotion) -> Self {
        Record {
            text: text.into(),
            sentiment,
        }
    }
}

/// Loads [`Record`]s from CSV data.
#[derive(Debug, Clone)]
pub struct CsvRecordLoader {
    /// Header name of the text column.
    text_column: String,
    /// Header name of the label column.
    label_column: String,
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
}

impl Default for CsvRecordLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRecordLoader {
    /// Create a loader for the `text` and `sentiment` columns.
    pub fn new() -> Self {
        CsvRecordLoader {
            text_column: "text".to_string(),
            label_column: "sentiment".to_string(),
            delimiter: b',',
            trim: false,
        }
    }

    /// Set the header name of the text column.
    pub fn with_text_column<S: Into<String>>(mut self, column: S) -> Self {
        self.text_column = column.into();
        self
    }

    /// Set the header name of the label column.
    pub fn with_label_column<S: Into<String>>(mut self, column: S) -> Self {
        self.label_column = column.into();
        self
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Load all records from a CSV file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let path = path.as_ref();
        info!("Loading records from {}", path.display());
        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// Load all records from any reader producing CSV data.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let text_idx = Self::column_index(&headers, &self.text_column)?;
        let label_idx = Self::column_index(&headers, &self.label_column)?;
        debug!(
            "Using column {} for text and column {} for labels",
            text_idx, label_idx
        );

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let csv_record = result?;
            let text = csv_record.get(text_idx).ok_or_else(|| {
                SentimentError::data(format!("row {row}: missing `{}` value", self.text_column))
            })?;
            let label = csv_record.get(label_idx).ok_or_else(|| {
                SentimentError::data(format!("row {row}: missing `{}` value", self.label_column))
            })?;
            let sentiment: Emotion = label
                .parse()
                .map_err(|e| match e {
                    SentimentError::Data(msg) => SentimentError::data(format!("row {row}: {msg}")),
                    other => other,
                })?;

            records.push(Record::new(text, sentiment));
        }

        info!("Loaded {} records", records.len());
        Ok(records)
    }

    fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| SentimentError::data(format!("missing column `{name}`")))
    }
}

/// Render the first `n` records as an aligned text table.
pub fn preview(records: &[Record], n: usize) -> String {
    const MAX_TEXT: usize = 60;

    let mut out = format!("{:>5}  {:<width$}  {}\n", "", "text", "sentiment", width = MAX_TEXT);
    for (i, record) in records.iter().take(n).enumerate() {
        let text: String = if record.text.chars().count() > MAX_TEXT {
            record.text.chars().take(MAX_TEXT - 3).chain("...".chars()).collect()
        } else {
            record.text.clone()
        };
        let text = text.replace(['\n', '\r'], " ");
        out.push_str(&format!(
            "{:>5}  {:<width$}  {}\n",
            i,
            text,
            record.sentiment,
            width = MAX_TEXT
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_by_header_name() {
        let csv = ",text,sentiment\n0,Stay safe everyone,joy\n1,\"Scared, really scared\",fear\n";
        let records = CsvRecordLoader::new().load_reader(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new("Stay safe everyone", Emotion::Joy));
        assert_eq!(records[1].text, "Scared, really scared");
        assert_eq!(records[1].sentiment, Emotion::Fear);
    }

    #[test]
    fn test_missing_column() {
        let csv = "tweet,sentiment\nhello,joy\n";
        let err = CsvRecordLoader::new()
            .load_reader(csv.as_bytes())
            .unwrap_err();

        assert!(err.to_string().contains("missing column `text`"));
    }

    #[test]
    fn test_unknown_label_names_row() {
        let csv = "text,sentiment\nfine,joy\nwhat,surprise\n";
        let err = CsvRecordLoader::new()
            .load_reader(csv.as_bytes())
            .unwrap_err();

        match err {
            SentimentError::Data(msg) => {
                assert!(msg.starts_with("row 1:"));
                assert!(msg.contains("surprise"));
            }
            other => panic!("Expected data error, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let csv = "body;label\nso angry;anger\n";
        let records = CsvRecordLoader::new()
            .with_text_column("body")
            .with_label_column("label")
            .with_delimiter(';')
            .load_reader(csv.as_bytes())
            .unwrap();

        assert_eq!(records, vec![Record::new("so angry", Emotion::Anger)]);
    }

    #[test]
    fn test_missing_file() {
        let result = CsvRecordLoader::new().load_path("/nonexistent/finalSentimentdata2.csv");
        assert!(matches!(result, Err(SentimentError::Io(_))));
    }

    #[test]
    fn test_preview() {
        let records = vec![
            Record::new("first", Emotion::Sad),
            Record::new("x".repeat(100), Emotion::Joy),
            Record::new("third", Emotion::Fear),
        ];

        let table = preview(&records, 2);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("first"));
        assert!(lines[1].ends_with("sad"));
        assert!(lines[2].contains("..."));
        assert!(!table.contains("third"));
    }
}
