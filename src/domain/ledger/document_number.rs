/// Remove every apostrophe from a document number, wherever it appears.
///
/// Runs after the empty-field filter, so a number made only of apostrophes
/// comes out as an empty string and the row is still exported.
pub fn clean_document_number(raw: &str) -> String {
    raw.chars().filter(|&c| c != '\'').collect()
}
