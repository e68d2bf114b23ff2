//! Timesheet format detection and strategy dispatch.

use crate::config::EngineerDirectory;
use crate::document::ExtractedDocument;
use crate::error::{EngineError, EngineResult};
use crate::models::{Category, EngineerLevel, TimesheetEntry};

use super::format_a::FormatA;
use super::format_b::FormatB;

/// The closed set of supported timesheet layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesheetFormat {
    /// Labeled time-report layout with explicit Regular/Overtime/Premier OT
    /// columns.
    A,
    /// Site-hours layout with travel/weekend/Saturday columns, in two
    /// sub-variants.
    B,
}

/// One timesheet layout's extraction strategy.
///
/// Detection picks the strategy before dispatch; a strategy never falls
/// back to another mid-parse.
pub(crate) trait ExtractionStrategy {
    fn extract(
        &self,
        doc: &ExtractedDocument,
        directory: &EngineerDirectory,
    ) -> EngineResult<Vec<TimesheetEntry>>;
}

impl TimesheetFormat {
    fn strategy(self) -> &'static dyn ExtractionStrategy {
        match self {
            TimesheetFormat::A => &FormatA,
            TimesheetFormat::B => &FormatB,
        }
    }
}

/// Detects which layout a timesheet's first-page text uses.
///
/// # Errors
///
/// Fails when neither format's markers are present.
///
/// # Example
///
/// ```
/// use invoice_engine::extract::{TimesheetFormat, detect_format};
///
/// let text = "Travel Time Regular Overtime Premier OT Total";
/// assert_eq!(detect_format(text).unwrap(), TimesheetFormat::A);
///
/// let text = "DATE HOURS ON SITE A(TRAV) B(WKD/FRI) C(SAT)";
/// assert_eq!(detect_format(text).unwrap(), TimesheetFormat::B);
/// ```
pub fn detect_format(text: &str) -> EngineResult<TimesheetFormat> {
    if text.contains("Regular") && text.contains("Overtime") && text.contains("Premier OT") {
        return Ok(TimesheetFormat::A);
    }
    if text.contains("HOURS ON SITE") || (text.contains("TRAV") && text.contains("WKD/FRI")) {
        return Ok(TimesheetFormat::B);
    }
    Err(EngineError::validation(vec![
        "Cannot detect timesheet format: neither Format A nor Format B markers found".to_string(),
    ]))
}

/// Extracts canonical entries from one timesheet document.
///
/// Detects the layout from the first page, then runs the matching
/// strategy. Engineers absent from the directory fall back to the
/// text-inferred category and the service/field level; strict validation
/// happens later, over the merged entry list.
pub fn extract_timesheet(
    doc: &ExtractedDocument,
    directory: &EngineerDirectory,
) -> EngineResult<Vec<TimesheetEntry>> {
    let format = detect_format(doc.first_page_text())?;
    tracing::debug!(source = %doc.source, format = ?format, "detected timesheet format");
    format.strategy().extract(doc, directory)
}

/// Resolves an engineer's category and level from the directory, falling
/// back to the document-inferred category and the default level.
pub(crate) fn resolve_profile(
    directory: &EngineerDirectory,
    name: &str,
    inferred_category: Category,
) -> (Category, EngineerLevel) {
    match directory.lookup(name) {
        Some(profile) => (profile.category, profile.level),
        None => (inferred_category, EngineerLevel::ServiceField),
    }
}
