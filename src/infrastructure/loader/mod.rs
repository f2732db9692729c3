// ============================================================
// LEDGER LOADER
// ============================================================
// Upload bytes -> RawTable. Rejects unknown formats and tables
// that are not exactly six columns wide.

mod cell;
mod csv_loader;
mod excel_loader;
mod file_format;

use std::path::Path;

use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::ledger::{NormalizationError, RawRow, RawTable, RAW_FIELD_COUNT};

pub use csv_loader::CsvLoader;
pub use file_format::FileFormat;

/// Decodes uploads into positional raw rows
#[derive(Debug, Clone)]
pub struct LedgerLoader {
    csv: CsvLoader,
    trim: bool,
}

impl Default for LedgerLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LedgerLoader {
    pub fn new(trim: bool) -> Self {
        Self {
            csv: CsvLoader::new().with_trim(trim),
            trim,
        }
    }

    /// Load an upload, choosing the decoder by file extension
    pub fn load_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<RawTable> {
        let format = FileFormat::from_file_name(file_name)?;

        let rows = match format {
            FileFormat::Csv => self.csv.read_rows(bytes)?,
            FileFormat::Excel => excel_loader::read_rows(bytes, self.trim)?,
        };

        let table = into_raw_table(rows)?;
        info!(
            file_name,
            format = ?format,
            rows = table.len(),
            "Loaded ledger upload"
        );
        Ok(table)
    }

    /// Load a file from disk
    pub fn load_path(&self, path: &Path) -> Result<RawTable> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AppError::ValidationError(format!("Invalid file path: {}", path.display())))?;

        // Check the format before touching the disk
        FileFormat::from_file_name(file_name)?;

        let bytes = std::fs::read(path)?;
        self.load_bytes(file_name, &bytes)
    }
}

/// Pad short rows with missing cells; the widest row must be six columns
fn into_raw_table(rows: Vec<Vec<Option<String>>>) -> Result<RawTable> {
    let widest = rows
        .iter()
        .enumerate()
        .max_by_key(|(index, row)| (row.len(), std::cmp::Reverse(*index)));

    if let Some((index, row)) = widest {
        if row.len() != RAW_FIELD_COUNT {
            return Err(NormalizationError::FieldCount {
                row: index + 1,
                found: row.len(),
            }
            .into());
        }
    }

    Ok(rows
        .into_iter()
        .map(|mut row| {
            row.resize(RAW_FIELD_COUNT, None);
            RawRow::new(row)
        })
        .collect::<Vec<_>>()
        .into())
}
