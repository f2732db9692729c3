use serde::{Deserialize, Serialize};
use std::fmt;

/// Failures that abort normalization of a whole table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationError {
    /// The decoded table has no rows at all
    EmptyInput,

    /// A row does not carry exactly six positional fields (row is 1-based)
    FieldCount { row: usize, found: usize },

    /// A document balance is not a number (row is 1-based)
    BalanceParse { row: usize, value: String },
}

impl NormalizationError {
    /// Message shown to the person who uploaded the file
    pub fn user_message(&self) -> String {
        match self {
            NormalizationError::EmptyInput => "The uploaded file is empty.".to_string(),
            NormalizationError::FieldCount { row, found } => format!(
                "Row {} has {} columns; every row must have exactly 6 columns.",
                row, found
            ),
            NormalizationError::BalanceParse { row, value } => format!(
                "Row {}: document balance '{}' is not a number.",
                row, value
            ),
        }
    }
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationError::EmptyInput => write!(f, "Empty input: no rows to normalize"),
            NormalizationError::FieldCount { row, found } => {
                write!(f, "Field count error: row {} has {} fields, expected 6", row, found)
            }
            NormalizationError::BalanceParse { row, value } => {
                write!(f, "Balance parse error: row {} has non-numeric balance {:?}", row, value)
            }
        }
    }
}

impl std::error::Error for NormalizationError {}
