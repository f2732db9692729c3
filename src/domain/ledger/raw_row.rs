// ============================================================
// RAW LEDGER ROWS
// ============================================================
// Positional rows exactly as decoded from the uploaded file

use serde::{Deserialize, Serialize};

/// Number of positional fields every raw ledger row carries
pub const RAW_FIELD_COUNT: usize = 6;

/// Positional binding of the raw columns. The source files have no header,
/// so position is the only thing that identifies a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawField {
    DebtorReference,
    DocumentNumber,
    DocumentDate,
    DocumentBalance,
    TransactionType,
    DueDate,
}

impl RawField {
    pub const ALL: [RawField; RAW_FIELD_COUNT] = [
        RawField::DebtorReference,
        RawField::DocumentNumber,
        RawField::DocumentDate,
        RawField::DocumentBalance,
        RawField::TransactionType,
        RawField::DueDate,
    ];

    /// Zero-based column position in the source file
    pub fn index(self) -> usize {
        match self {
            RawField::DebtorReference => 0,
            RawField::DocumentNumber => 1,
            RawField::DocumentDate => 2,
            RawField::DocumentBalance => 3,
            RawField::TransactionType => 4,
            RawField::DueDate => 5,
        }
    }
}

/// One unprocessed row. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    fields: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(fields: Vec<Option<String>>) -> Self {
        Self { fields }
    }

    /// Build a row where every value is present
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: values.into_iter().map(|v| Some(v.into())).collect(),
        }
    }

    pub fn fields(&self) -> &[Option<String>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of a positional field, `None` when missing
    pub fn get(&self, field: RawField) -> Option<&str> {
        self.fields
            .get(field.index())
            .and_then(|value| value.as_deref())
    }

    /// Value of a positional field, empty string when missing
    pub fn value(&self, field: RawField) -> &str {
        self.get(field).unwrap_or("")
    }

    /// True when any cell is missing or the empty string. Whitespace is
    /// content here; trimming is the loader's job.
    pub fn has_empty_field(&self) -> bool {
        self.fields
            .iter()
            .any(|value| value.as_deref().map_or(true, str::is_empty))
    }
}

/// Ordered rows as produced by the loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<RawRow>> for RawTable {
    fn from(rows: Vec<RawRow>) -> Self {
        Self::new(rows)
    }
}
