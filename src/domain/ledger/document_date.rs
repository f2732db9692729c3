// ============================================================
// DOCUMENT DATE
// ============================================================
// Best-effort day-first parsing. Unparseable values are kept verbatim.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Output layout for every date that parses
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Trailing time-of-day that is ignored when reading a date
static TIME_SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<date>.+?)(?:[ T]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?$").unwrap()
});

// 01/02/2023, 1-2-23, 01.02.2023
static DAY_FIRST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<a>\d{1,2})[/.\-](?P<b>\d{1,2})[/.\-](?P<year>\d{4}|\d{2})$").unwrap()
});

// 2023-03-15, 2023/3/15, 2023.03.15
static YEAR_FIRST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>\d{4})[/.\-](?P<month>\d{1,2})[/.\-](?P<day>\d{1,2})$").unwrap()
});

// 20230315
static COMPACT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<year>\d{4})(?P<month>\d{2})(?P<day>\d{2})$").unwrap());

/// Layouts with month names, tried in order. `%B` also reads abbreviations.
/// Two-digit years go first: `%Y` would read `23` as the year 23.
const TEXTUAL_FORMATS: &[&str] = &[
    "%d %B %y",
    "%d-%B-%y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Outcome of formatting a document date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormatting {
    /// The value parsed and is rendered as `dd/mm/yyyy`
    Formatted(NaiveDate),

    /// The value did not parse and is kept as given
    Unchanged(String),
}

impl DateFormatting {
    pub fn is_formatted(&self) -> bool {
        matches!(self, DateFormatting::Formatted(_))
    }

    /// Text written to the export column
    pub fn into_display(self) -> String {
        match self {
            DateFormatting::Formatted(date) => date.format(DISPLAY_FORMAT).to_string(),
            DateFormatting::Unchanged(original) => original,
        }
    }
}

/// Format a raw document date. Never fails.
pub fn format_document_date(raw: &str) -> DateFormatting {
    match parse_day_first(raw) {
        Some(date) => DateFormatting::Formatted(date),
        None => DateFormatting::Unchanged(raw.to_string()),
    }
}

/// Parse a date, resolving ambiguous numeric dates day before month.
///
/// When the day-first reading of a numeric date is impossible
/// (`02/15/2023`), the month-first reading is used instead.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = TIME_SUFFIX_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps.name("date"))
        .map(|m| m.as_str().trim())
        .unwrap_or(trimmed);

    parse_numeric_day_first(date_part)
        .or_else(|| parse_year_first(date_part))
        .or_else(|| parse_textual(date_part))
}

fn parse_numeric_day_first(value: &str) -> Option<NaiveDate> {
    let caps = DAY_FIRST_PATTERN.captures(value)?;
    let first: u32 = caps["a"].parse().ok()?;
    let second: u32 = caps["b"].parse().ok()?;
    let year = expand_year(&caps["year"])?;

    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

fn parse_year_first(value: &str) -> Option<NaiveDate> {
    let caps = YEAR_FIRST_PATTERN
        .captures(value)
        .or_else(|| COMPACT_PATTERN.captures(value))?;
    let year: i32 = caps["year"].parse().ok()?;
    let month: u32 = caps["month"].parse().ok()?;
    let day: u32 = caps["day"].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_textual(value: &str) -> Option<NaiveDate> {
    TEXTUAL_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Two-digit years: 00-68 are 2000s, 69-99 are 1900s
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    if year.len() == 4 {
        return Some(value);
    }
    if value < 69 {
        Some(2000 + value)
    } else {
        Some(1900 + value)
    }
}
