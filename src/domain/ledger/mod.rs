// ============================================================
// LEDGER DOMAIN LAYER
// ============================================================
// Raw and clean ledger rows plus the per-field rules applied to them
// No I/O, no async

mod balance;
mod clean_row;
mod document_date;
mod document_number;
mod error;
mod raw_row;
mod transaction_type;

pub use balance::{format_balance, parse_magnitude};
pub use clean_row::{CleanRow, CleanTable, EXPORT_HEADERS};
pub use document_date::{format_document_date, parse_day_first, DateFormatting};
pub use document_number::clean_document_number;
pub use error::NormalizationError;
pub use raw_row::{RawField, RawRow, RawTable, RAW_FIELD_COUNT};
pub use transaction_type::TransactionType;
