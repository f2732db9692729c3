// ============================================================
// CSV LOADER
// ============================================================
// Decode headerless delimited text into raw positional rows

use std::borrow::Cow;

use csv::{ReaderBuilder, Trim};
use encoding_rs::WINDOWS_1252;
use tracing::debug;

use super::cell::normalize_cell;
use crate::domain::error::AppError;

/// CSV reader for ledger uploads
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Decode bytes and read every record. There is no header row.
    pub fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<Option<String>>>, AppError> {
        let content = decode_text(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }

            rows.push(
                record
                    .iter()
                    .map(|value| normalize_cell(value, self.trim))
                    .collect(),
            );
        }

        debug!(rows = rows.len(), "Read CSV records");
        Ok(rows)
    }
}

/// UTF-8 when valid (BOM stripped), Windows-1252 otherwise
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(_) => {
            debug!("CSV is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}
