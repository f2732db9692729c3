use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ledger::NormalizationError;

/// Message shown when the upload is neither CSV nor Excel
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file format. Please upload a CSV or Excel file.";

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ParseError(String),
    IoError(String),
    ConfigError(String),
    UnsupportedFormat(String),
    Normalization(NormalizationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::UnsupportedFormat(name) => write!(f, "Unsupported format: {}", name),
            AppError::Normalization(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Normalization(err) => Some(err),
            _ => None,
        }
    }
}

impl AppError {
    /// True when the uploaded file, not the service, caused the failure
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::ParseError(_)
                | AppError::UnsupportedFormat(_)
                | AppError::Normalization(_)
        )
    }

    /// Human-readable text for the end user
    pub fn user_message(&self) -> String {
        match self {
            AppError::UnsupportedFormat(_) => UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            AppError::Normalization(err) => err.user_message(),
            AppError::ParseError(msg) => format!("The uploaded file could not be read: {}", msg),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::Internal(_) | AppError::IoError(_) | AppError::ConfigError(_) => {
                "Something went wrong while processing the file. Please try again.".to_string()
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<NormalizationError> for AppError {
    fn from(err: NormalizationError) -> Self {
        AppError::Normalization(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
