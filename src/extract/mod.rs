//! Document extraction: contract and timesheet interpretation.
//!
//! The extractors consume [`ExtractedDocument`](crate::document::ExtractedDocument)
//! values produced by the upstream document-extraction collaborator and
//! produce canonical model values. Timesheet extraction auto-detects one of
//! two supported layouts and dispatches to the matching strategy; the
//! strategies never mix mid-parse.

mod contract;
mod dates;
mod format_a;
mod format_b;
mod names;
mod timesheet;

pub use contract::extract_contract;
pub use dates::parse_flexible_date;
pub use timesheet::{TimesheetFormat, detect_format, extract_timesheet};

use rust_decimal::Decimal;
use std::str::FromStr;

/// Returns the trimmed text of a cell, or an empty string for absent cells.
pub(crate) fn cell_text(row: &[Option<String>], index: usize) -> &str {
    row.get(index)
        .and_then(|c| c.as_deref())
        .map_or("", str::trim)
}

/// Parses a decimal cell, treating empty or unparseable text as zero.
///
/// Timesheet tables leave cells blank (or OCR mangles them) far more often
/// than they carry a real zero; both read as no hours.
pub(crate) fn safe_decimal(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed).unwrap_or(Decimal::ZERO)
}

/// Infers the deployment category from document text and source name.
///
/// Any mention of "offshore" marks the document offshore; otherwise the
/// default is onshore.
pub(crate) fn detect_category(text: &str, source: &str) -> crate::models::Category {
    let combined = format!("{text} {source}").to_lowercase();
    if combined.contains("offshore") {
        crate::models::Category::Offshore
    } else {
        crate::models::Category::Onshore
    }
}
