/// Cell texts read as missing values, matching common spreadsheet tooling
const NULL_SENTINELS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Turn raw cell text into a field value, `None` for missing cells
pub fn normalize_cell(value: &str, trim: bool) -> Option<String> {
    let value = if trim { value.trim() } else { value };
    if NULL_SENTINELS.contains(&value) {
        None
    } else {
        Some(value.to_string())
    }
}
