//! Date parsing for timesheet cells.
//!
//! Timesheets arrive with several date spellings, and scanned sheets often
//! come back from OCR with a date split across visual line breaks, e.g.
//! `"TUE\n30 / 1 2 / 2025"`. The helpers here first try the clean formats
//! and then attempt a digit-run reconstruction.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// The accepted clean date spellings, tried in order.
const DATE_FORMATS: [&str; 5] = [
    "%d/%m/%Y", // 30/12/2025
    "%d-%b-%y", // 10-Jan-26
    "%d-%b-%Y", // 25-Jan-2026
    "%Y-%m-%d", // 2026-01-10
    "%d.%m.%Y", // 30.12.2025
];

static CLEAN_DMY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})/(\d{2})/(\d{4})").expect("valid regex"));

static DAY_NAME_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+\s*\n?").expect("valid regex"));

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Parses a date cell in any of the accepted clean formats.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use invoice_engine::extract::parse_flexible_date;
///
/// let expected = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
/// assert_eq!(parse_flexible_date("10/01/2026"), Some(expected));
/// assert_eq!(parse_flexible_date("10-Jan-26"), Some(expected));
/// assert_eq!(parse_flexible_date("10-Jan-2026"), Some(expected));
/// assert_eq!(parse_flexible_date("2026-01-10"), Some(expected));
/// assert_eq!(parse_flexible_date("10.01.2026"), Some(expected));
/// assert_eq!(parse_flexible_date("Totals"), None);
/// ```
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Recovers `(year, month, day)` components from a possibly OCR-damaged
/// date cell.
///
/// A clean `dd/mm/yyyy` match wins. Otherwise the leading day-name token is
/// stripped and the digit runs are reassembled: the trailing 4-digit run is
/// the year, the first run is the day, and the runs in between concatenate
/// into the month. This recovers dates OCR split mid-number, e.g.
/// `"30 / 1 2 / 2025"` → 30/12/2025.
///
/// The components are not range-checked here; the caller decides how an
/// impossible date is reported.
pub(crate) fn date_components_from_cell(cell: &str) -> Option<(i32, u32, u32)> {
    if let Some(caps) = CLEAN_DMY_RE.captures(cell) {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        return Some((year, month, day));
    }

    let stripped = DAY_NAME_PREFIX_RE.replace(cell, "");
    let runs: Vec<&str> = DIGIT_RUN_RE
        .find_iter(stripped.trim())
        .map(|m| m.as_str())
        .collect();
    if runs.len() < 3 {
        return None;
    }

    let year_run = runs[runs.len() - 1];
    if year_run.len() != 4 {
        return None;
    }
    let year = year_run.parse().ok()?;
    let day = runs[0].parse().ok()?;
    let month_text: String = runs[1..runs.len() - 1].concat();
    let month = month_text.parse().ok()?;

    Some((year, month, day))
}
