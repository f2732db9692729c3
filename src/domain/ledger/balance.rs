use super::TransactionType;

/// Parse a raw balance into its absolute value.
///
/// Accepts an optional sign, a fraction and an exponent. Thousands
/// separators, currency symbols and values that overflow a double
/// (`1e400`, `inf`, `nan`) are rejected.
pub fn parse_magnitude(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(f64::abs)
}

/// Render a balance with two fraction digits, signed by transaction type.
///
/// The raw sign is discarded; only credits are negative. Rounding works on
/// the binary value, so `2.675` renders as `2.67`.
pub fn format_balance(raw: &str, transaction_type: &TransactionType) -> Option<String> {
    let digits = format!("{:.2}", parse_magnitude(raw)?);

    if transaction_type.is_credit() {
        Some(format!("-{}", digits))
    } else {
        Some(digits)
    }
}
