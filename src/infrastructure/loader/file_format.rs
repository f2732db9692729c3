use std::path::Path;

use crate::domain::error::AppError;

/// Upload formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

impl FileFormat {
    /// Detect the format from a file name's extension (case-insensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xls") | Some("xlsx") => Ok(FileFormat::Excel),
            _ => Err(AppError::UnsupportedFormat(file_name.to_string())),
        }
    }
}
