// ============================================================
// LEDGER NORMALIZER
// ============================================================
// Pure transformation of a raw six-column ledger into the
// five-column export layout. Every step runs over the whole table.

use tracing::{debug, warn};

use crate::domain::ledger::{
    clean_document_number, format_balance, format_document_date, CleanRow, CleanTable,
    DateFormatting, NormalizationError, RawField, RawRow, RawTable, TransactionType,
    RAW_FIELD_COUNT,
};

/// A raw row that survived filtering, with its 1-based position in the upload
struct Survivor<'a> {
    row_number: usize,
    row: &'a RawRow,
}

/// Normalize a raw ledger table.
///
/// Emptiness is checked on the raw input only: a table whose rows are all
/// dropped by the filter yields an empty `CleanTable`, not an error. Any
/// error aborts the whole table.
pub fn normalize(raw: &RawTable) -> Result<CleanTable, NormalizationError> {
    if raw.is_empty() {
        return Err(NormalizationError::EmptyInput);
    }
    check_field_counts(raw)?;

    let survivors = drop_incomplete_rows(raw);

    let document_numbers: Vec<String> = survivors
        .iter()
        .map(|s| clean_document_number(s.row.value(RawField::DocumentNumber)))
        .collect();

    let transaction_types = map_transaction_types(&survivors);

    let document_dates: Vec<DateFormatting> = survivors
        .iter()
        .map(|s| {
            let formatted = format_document_date(s.row.value(RawField::DocumentDate));
            if !formatted.is_formatted() {
                debug!(row = s.row_number, "Document date kept as given");
            }
            formatted
        })
        .collect();

    let balances = survivors
        .iter()
        .zip(&transaction_types)
        .map(|(s, transaction_type)| {
            let raw_balance = s.row.value(RawField::DocumentBalance);
            format_balance(raw_balance, transaction_type).ok_or_else(|| {
                NormalizationError::BalanceParse {
                    row: s.row_number,
                    value: raw_balance.to_string(),
                }
            })
        })
        .collect::<Result<Vec<String>, NormalizationError>>()?;

    let rows = survivors
        .iter()
        .zip(transaction_types)
        .zip(document_numbers)
        .zip(document_dates)
        .zip(balances)
        .map(|((((s, transaction_type), number), date), balance)| {
            CleanRow::new(
                s.row.value(RawField::DebtorReference).to_string(),
                transaction_type,
                number,
                date.into_display(),
                balance,
            )
        })
        .collect();

    Ok(CleanTable::new(rows))
}

fn check_field_counts(raw: &RawTable) -> Result<(), NormalizationError> {
    match raw
        .rows()
        .iter()
        .position(|row| row.len() != RAW_FIELD_COUNT)
    {
        Some(index) => Err(NormalizationError::FieldCount {
            row: index + 1,
            found: raw.rows()[index].len(),
        }),
        None => Ok(()),
    }
}

fn drop_incomplete_rows(raw: &RawTable) -> Vec<Survivor<'_>> {
    let survivors: Vec<Survivor<'_>> = raw
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.has_empty_field())
        .map(|(index, row)| Survivor {
            row_number: index + 1,
            row,
        })
        .collect();

    let dropped = raw.len() - survivors.len();
    if dropped > 0 {
        warn!(dropped, total = raw.len(), "Dropped rows with empty fields");
    }
    survivors
}

fn map_transaction_types(survivors: &[Survivor<'_>]) -> Vec<TransactionType> {
    survivors
        .iter()
        .map(|s| {
            let mapped = TransactionType::from_raw(s.row.value(RawField::TransactionType));
            if !mapped.is_recognized() {
                warn!(
                    row = s.row_number,
                    code = mapped.as_str(),
                    "Unrecognized transaction type passed through"
                );
            }
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn row(values: [&str; 6]) -> RawRow {
        RawRow::new(
            values
                .iter()
                .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
                .collect(),
        )
    }

    fn table(rows: Vec<[&str; 6]>) -> RawTable {
        RawTable::new(rows.into_iter().map(row).collect())
    }

    fn values(clean: &CleanTable) -> Vec<[String; 5]> {
        clean
            .iter()
            .map(|r| r.values().map(|v| v.to_string()))
            .collect()
    }

    #[test]
    fn test_invoice_row() {
        let raw = table(vec![["D1", "N1'", "01/02/2023", "100", "I", "15/02/2023"]]);
        let clean = normalize(&raw).unwrap();

        assert_eq!(clean.len(), 1);
        assert_eq!(
            clean.rows()[0].values(),
            ["D1", "INV", "N1", "01/02/2023", "100.00"]
        );
    }

    #[test]
    fn test_credit_row() {
        let raw = table(vec![["D2", "N2", "2023-03-15", "75.5", "C", "2023-03-30"]]);
        let clean = normalize(&raw).unwrap();

        assert_eq!(
            clean.rows()[0].values(),
            ["D2", "CRD", "N2", "15/03/2023", "-75.50"]
        );
    }

    #[test]
    fn test_row_with_empty_balance_is_dropped() {
        let raw = table(vec![
            ["D1", "N1", "01/02/2023", "", "I", "15/02/2023"],
            ["D2", "N2", "01/02/2023", "10", "I", "15/02/2023"],
        ]);
        let clean = normalize(&raw).unwrap();

        assert_eq!(clean.len(), 1);
        assert_eq!(clean.rows()[0].debtor_reference(), "D2");
    }

    #[test]
    fn test_empty_due_date_also_drops_row() {
        let raw = table(vec![["D1", "N1", "01/02/2023", "10", "I", ""]]);
        assert!(normalize(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let raw = RawTable::default();
        assert_eq!(normalize(&raw), Err(NormalizationError::EmptyInput));
    }

    #[test]
    fn test_all_rows_dropped_yields_empty_table() {
        let raw = table(vec![
            ["", "N1", "01/02/2023", "10", "I", "15/02/2023"],
            ["D2", "N2", "", "10", "C", "15/02/2023"],
        ]);
        let clean = normalize(&raw).unwrap();
        assert!(clean.is_empty());
    }

    #[test]
    fn test_unparseable_date_is_preserved() {
        let raw = table(vec![["D1", "N1", "not-a-date", "10", "I", "x"]]);
        let clean = normalize(&raw).unwrap();
        assert_eq!(clean.rows()[0].document_date(), "not-a-date");
    }

    #[test]
    fn test_balance_parse_failure_aborts_table() {
        let raw = table(vec![
            ["D1", "N1", "01/02/2023", "10", "I", "x"],
            ["D2", "N2", "01/02/2023", "ten", "I", "x"],
        ]);
        assert_eq!(
            normalize(&raw),
            Err(NormalizationError::BalanceParse {
                row: 2,
                value: "ten".to_string()
            })
        );
    }

    #[test]
    fn test_bad_balance_on_dropped_row_is_ignored() {
        let raw = table(vec![
            ["D1", "N1", "01/02/2023", "oops", "I", ""],
            ["D2", "N2", "01/02/2023", "5", "I", "x"],
        ]);
        assert_eq!(normalize(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_wrong_field_count_is_reported() {
        let raw = RawTable::new(vec![
            RawRow::from_values(["D1", "N1", "01/02/2023", "10", "I", "x"]),
            RawRow::from_values(["D2", "N2", "01/02/2023", "10", "I"]),
        ]);
        assert_eq!(
            normalize(&raw),
            Err(NormalizationError::FieldCount { row: 2, found: 5 })
        );
    }

    #[test]
    fn test_sign_ignores_raw_sign() {
        let raw = table(vec![
            ["D1", "N1", "01/02/2023", "-50", "I", "x"],
            ["D2", "N2", "01/02/2023", "-50", "'C'", "x"],
        ]);
        let clean = normalize(&raw).unwrap();

        assert_eq!(clean.rows()[0].document_balance(), "50.00");
        assert_eq!(clean.rows()[1].document_balance(), "-50.00");
        assert_eq!(clean.rows()[1].transaction_type().as_str(), "CRD");
    }

    #[test]
    fn test_unrecognized_type_is_passed_through_as_positive() {
        let raw = table(vec![["D1", "N1", "01/02/2023", "-12.5", "'X'", "x"]]);
        let clean = normalize(&raw).unwrap();

        assert_eq!(
            clean.rows()[0].values(),
            ["D1", "'X'", "N1", "01/02/2023", "12.50"]
        );
    }

    #[test]
    fn test_order_is_preserved_under_filtering() {
        let raw = table(vec![
            ["A", "1", "01/01/2023", "1", "I", "x"],
            ["B", "2", "01/01/2023", "", "I", "x"],
            ["C", "3", "01/01/2023", "3", "C", "x"],
            ["D", "", "01/01/2023", "4", "I", "x"],
            ["E", "5", "01/01/2023", "5", "I", "x"],
        ]);
        let clean = normalize(&raw).unwrap();

        let debtors: Vec<&str> = clean.iter().map(|r| r.debtor_reference()).collect();
        assert_eq!(debtors, vec!["A", "C", "E"]);
    }

    #[test]
    fn test_output_invariants() {
        let raw = table(vec![
            ["D1", "'N'1''", "2023-01-05", "0.005", "C", "x"],
            ["D2", "N2", "5 Jan 2023", "1e2", "I", "x"],
            ["D3", "N3", "garbage", "-3.999", "Z", "x"],
        ]);
        let clean = normalize(&raw).unwrap();
        let shape = Regex::new(r"^-?\d+\.\d{2}$").unwrap();

        for row in &clean {
            assert!(!row.document_number().contains('\''));
            assert!(shape.is_match(row.document_balance()));
            assert!(row.values().iter().all(|v| !v.is_empty()));
        }
        assert_eq!(
            values(&clean),
            vec![
                ["D1", "CRD", "N1", "05/01/2023", "-0.01"].map(String::from),
                ["D2", "INV", "N2", "05/01/2023", "100.00"].map(String::from),
                ["D3", "Z", "N3", "garbage", "4.00"].map(String::from),
            ]
        );
    }

    #[test]
    fn test_apostrophe_only_document_number_exports_empty() {
        let raw = table(vec![["D1", "''", "01/02/2023", "10", "I", "x"]]);
        let clean = normalize(&raw).unwrap();

        assert_eq!(clean.len(), 1);
        assert_eq!(clean.rows()[0].document_number(), "");
    }

    #[test]
    fn test_whitespace_only_balance_is_a_parse_error() {
        let raw = table(vec![["D1", "N1", "01/02/2023", "  ", "I", "x"]]);
        assert_eq!(
            normalize(&raw),
            Err(NormalizationError::BalanceParse {
                row: 1,
                value: "  ".to_string()
            })
        );
    }

    #[test]
    fn test_overflowing_balance_is_a_parse_error() {
        let raw = table(vec![["D1", "N1", "01/02/2023", "1e10000000", "C", "x"]]);
        assert!(matches!(
            normalize(&raw),
            Err(NormalizationError::BalanceParse { row: 1, .. })
        ));
    }

    #[test]
    fn test_renormalizing_clean_values_is_stable() {
        let raw = table(vec![["D1", "''N1''", "01/02/2023", "-10", "'C'", "x"]]);
        let first = normalize(&raw).unwrap();
        let r = &first.rows()[0];

        let again = table(vec![[
            r.debtor_reference(),
            r.document_number(),
            r.document_date(),
            r.document_balance(),
            r.transaction_type().as_str(),
            "x",
        ]]);
        let second = normalize(&again).unwrap();

        assert_eq!(first, second);
    }
}
