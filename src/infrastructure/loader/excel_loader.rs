// ============================================================
// EXCEL LOADER
// ============================================================
// Read the first worksheet of an .xls/.xlsx upload

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::Timelike;
use tracing::debug;

use super::cell::normalize_cell;
use crate::domain::error::AppError;

/// Read every row of the first worksheet as positional cell values
pub fn read_rows(bytes: &[u8], trim: bool) -> Result<Vec<Vec<Option<String>>>, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

    // The used range can start past column A; keep positions absolute
    let leading_columns = range.start().map_or(0, |(_, col)| col as usize);

    let rows: Vec<Vec<Option<String>>> = range
        .rows()
        .map(|row| {
            std::iter::repeat(None)
                .take(leading_columns)
                .chain(row.iter().map(|cell| cell_value(cell, trim)))
                .collect()
        })
        .filter(|row: &Vec<Option<String>>| row.iter().any(Option::is_some))
        .collect();

    debug!(rows = rows.len(), "Read Excel rows");
    Ok(rows)
}

/// Render one cell the way it would read in a text export
pub fn cell_value(cell: &Data, trim: bool) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) => normalize_cell(text, trim),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(format_float(*value)),
        Data::Bool(true) => Some("True".to_string()),
        Data::Bool(false) => Some("False".to_string()),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime)
                if datetime.hour() == 0 && datetime.minute() == 0 && datetime.second() == 0 =>
            {
                Some(datetime.format("%Y-%m-%d").to_string())
            }
            Some(datetime) => Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Some(format!("{}", cell)),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => normalize_cell(text, trim),
    }
}

/// Integral floats lose their fraction (`100.0` reads as `100`)
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_scalar_cells() {
        assert_eq!(cell_value(&Data::Empty, true), None);
        assert_eq!(cell_value(&Data::Error(CellErrorType::NA), true), None);
        assert_eq!(
            cell_value(&Data::String(" D1 ".to_string()), true),
            Some("D1".to_string())
        );
        assert_eq!(cell_value(&Data::Int(42), true), Some("42".to_string()));
        assert_eq!(cell_value(&Data::Bool(true), true), Some("True".to_string()));
    }

    #[test]
    fn test_float_cells() {
        assert_eq!(cell_value(&Data::Float(100.0), true), Some("100".to_string()));
        assert_eq!(cell_value(&Data::Float(75.5), true), Some("75.5".to_string()));
        assert_eq!(cell_value(&Data::Float(-3.25), true), Some("-3.25".to_string()));
    }

    #[test]
    fn test_iso_date_text_is_kept() {
        assert_eq!(
            cell_value(&Data::DateTimeIso("2023-03-15T00:00:00".to_string()), true),
            Some("2023-03-15T00:00:00".to_string())
        );
    }

    #[test]
    fn test_invalid_workbook_is_a_parse_error() {
        let result = read_rows(b"definitely not a spreadsheet", true);
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
