// ============================================================
// TRANSACTION TYPE
// ============================================================
// Single-letter source codes mapped to export display codes

use serde::{Deserialize, Serialize};
use std::fmt;

const INVOICE_CODE: &str = "INV";
const CREDIT_CODE: &str = "CRD";

/// Recognized source codes. Anything not listed here is passed through.
const SOURCE_CODES: &[(&str, TransactionType)] = &[
    ("I", TransactionType::Invoice),
    ("C", TransactionType::Credit),
];

/// Mapped transaction type of a ledger row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Source code `I`, exported as `INV`
    Invoice,

    /// Source code `C`, exported as `CRD`. The only type with a negative balance.
    Credit,

    /// Any other raw value, kept exactly as it appeared in the file
    Unrecognized(String),
}

impl TransactionType {
    /// Map a raw cell value.
    ///
    /// One leading and one trailing apostrophe are stripped before the lookup.
    /// A value that already carries a display code maps to that code, so a
    /// second pass over cleaned data changes nothing. Unknown values keep
    /// their raw text, apostrophes included.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            INVOICE_CODE => return TransactionType::Invoice,
            CREDIT_CODE => return TransactionType::Credit,
            _ => {}
        }

        let code = strip_one_apostrophe(raw);
        SOURCE_CODES
            .iter()
            .find(|(source, _)| *source == code)
            .map(|(_, mapped)| mapped.clone())
            .unwrap_or_else(|| TransactionType::Unrecognized(raw.to_string()))
    }

    /// Text written to the export column
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Invoice => INVOICE_CODE,
            TransactionType::Credit => CREDIT_CODE,
            TransactionType::Unrecognized(raw) => raw,
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionType::Credit)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TransactionType::Unrecognized(_))
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_one_apostrophe(value: &str) -> &str {
    let value = value.strip_prefix('\'').unwrap_or(value);
    value.strip_suffix('\'').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_source_codes() {
        assert_eq!(TransactionType::from_raw("I"), TransactionType::Invoice);
        assert_eq!(TransactionType::from_raw("C"), TransactionType::Credit);
        assert_eq!(TransactionType::from_raw("I").as_str(), "INV");
        assert_eq!(TransactionType::from_raw("C").as_str(), "CRD");
    }

    #[test]
    fn test_strips_wrapping_apostrophes() {
        assert_eq!(TransactionType::from_raw("'I'"), TransactionType::Invoice);
        assert_eq!(TransactionType::from_raw("'C"), TransactionType::Credit);
        assert_eq!(TransactionType::from_raw("C'"), TransactionType::Credit);
    }

    #[test]
    fn test_strips_only_one_apostrophe_per_side() {
        let mapped = TransactionType::from_raw("''C''");
        assert_eq!(mapped, TransactionType::Unrecognized("''C''".to_string()));
    }

    #[test]
    fn test_unknown_code_passes_raw_value_through() {
        let mapped = TransactionType::from_raw("'X'");
        assert!(!mapped.is_recognized());
        assert!(!mapped.is_credit());
        assert_eq!(mapped.as_str(), "'X'");
    }

    #[test]
    fn test_display_codes_are_stable() {
        assert_eq!(TransactionType::from_raw("INV"), TransactionType::Invoice);
        assert_eq!(TransactionType::from_raw("CRD"), TransactionType::Credit);
        assert!(TransactionType::from_raw("CRD").is_credit());
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!(!TransactionType::from_raw("i").is_recognized());
        assert!(!TransactionType::from_raw("c").is_credit());
    }
}
