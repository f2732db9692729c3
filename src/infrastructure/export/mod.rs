use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::ledger::{CleanTable, EXPORT_HEADERS};

/// File name offered for download
pub const EXPORT_FILE_NAME: &str = "processed_data.csv";

/// MIME type of the exported file
pub const EXPORT_MIME: &str = "text/csv";

/// Serialize a clean table as comma-separated text with a header row
pub fn to_csv_bytes(table: &CleanTable) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in table {
        writer.write_record(row.values())?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish CSV export: {}", e)))
}
