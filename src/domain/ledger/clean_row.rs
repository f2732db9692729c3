// ============================================================
// CLEAN LEDGER ROWS
// ============================================================
// Normalized five-column rows ready for export

use serde::{Serialize, Serializer};

use super::TransactionType;

/// Header row of the exported file, in column order
pub const EXPORT_HEADERS: [&str; 5] = [
    "Debtor Reference",
    "Transaction Type",
    "Document Number",
    "Document Date",
    "Document Balance",
];

/// One normalized row. Built only by the normalizer and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRow {
    debtor_reference: String,
    transaction_type: TransactionType,
    document_number: String,
    document_date: String,
    document_balance: String,
}

impl CleanRow {
    pub(crate) fn new(
        debtor_reference: String,
        transaction_type: TransactionType,
        document_number: String,
        document_date: String,
        document_balance: String,
    ) -> Self {
        Self {
            debtor_reference,
            transaction_type,
            document_number,
            document_date,
            document_balance,
        }
    }

    pub fn debtor_reference(&self) -> &str {
        &self.debtor_reference
    }

    pub fn transaction_type(&self) -> &TransactionType {
        &self.transaction_type
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn document_date(&self) -> &str {
        &self.document_date
    }

    pub fn document_balance(&self) -> &str {
        &self.document_balance
    }

    /// Values in export column order
    pub fn values(&self) -> [&str; 5] {
        [
            self.debtor_reference.as_str(),
            self.transaction_type.as_str(),
            self.document_number.as_str(),
            self.document_date.as_str(),
            self.document_balance.as_str(),
        ]
    }
}

impl Serialize for CleanRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values().serialize(serializer)
    }
}

/// Normalized rows in the order they appeared in the upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CleanTable {
    rows: Vec<CleanRow>,
}

impl CleanTable {
    pub(crate) fn new(rows: Vec<CleanRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CleanRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a CleanTable {
    type Item = &'a CleanRow;
    type IntoIter = std::slice::Iter<'a, CleanRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> CleanRow {
        CleanRow::new(
            "D2".to_string(),
            TransactionType::Credit,
            "N2".to_string(),
            "15/03/2023".to_string(),
            "-75.50".to_string(),
        )
    }

    #[test]
    fn test_values_follow_export_order() {
        assert_eq!(
            sample_row().values(),
            ["D2", "CRD", "N2", "15/03/2023", "-75.50"]
        );
    }

    #[test]
    fn test_serializes_as_positional_array() {
        let table = CleanTable::new(vec![sample_row()]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["D2", "CRD", "N2", "15/03/2023", "-75.50"]])
        );
    }
}
