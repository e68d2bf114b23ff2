//! Format A extraction: the labeled "SERVICE / TIME REPORT" layout.
//!
//! Columns: Date | Day | Site Start | Site End | Travel | Regular |
//! Overtime | Premier OT | Total. Travel and Regular are both billed at
//! the normal rate per the contract's convention, so they merge into
//! normal hours; Overtime and Premier OT map directly to the overtime and
//! holiday categories.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::config::EngineerDirectory;
use crate::document::{ExtractedDocument, Table};
use crate::error::{EngineError, EngineResult};
use crate::extract::dates::parse_flexible_date;
use crate::extract::timesheet::{ExtractionStrategy, resolve_profile};
use crate::extract::{cell_text, detect_category, safe_decimal};
use crate::models::TimesheetEntry;

static ENGINEER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)EMR\s+Engineer\s*:\s*(.*?)(?:\n|Customer)").expect("valid regex")
});

static COURTESY_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(MR\.|MRS\.|MS\.)\s*").expect("valid regex"));

/// Tolerance for the stated row total against the recomputed one.
static TOTAL_TOLERANCE: LazyLock<Decimal> =
    LazyLock::new(|| Decimal::from_str("0.01").expect("valid decimal"));

const COL_DATE: usize = 0;
const COL_TRAVEL: usize = 4;
const COL_REGULAR: usize = 5;
const COL_OVERTIME: usize = 6;
const COL_PREMIER_OT: usize = 7;
const COL_TOTAL: usize = 8;

/// The Format A extraction strategy.
pub(crate) struct FormatA;

impl ExtractionStrategy for FormatA {
    fn extract(
        &self,
        doc: &ExtractedDocument,
        directory: &EngineerDirectory,
    ) -> EngineResult<Vec<TimesheetEntry>> {
        let mut entries = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        let text = doc.first_page_text();
        let tables = doc.pages.first().map(|p| p.tables.as_slice()).unwrap_or(&[]);

        let Some(engineer_name) = extract_engineer_name(text) else {
            return Err(EngineError::validation(vec![format!(
                "Engineer name not found in {}",
                doc.source
            )]));
        };
        let inferred_category = detect_category(text, &doc.source);

        let Some(time_table) = find_time_table(tables) else {
            return Err(EngineError::validation(vec![format!(
                "Time data table not found in {}",
                doc.source
            )]));
        };
        let Some(header_idx) = find_header_row(time_table) else {
            return Err(EngineError::validation(vec![format!(
                "Header row with 'Regular' not found in {}",
                doc.source
            )]));
        };

        for row in &time_table[header_idx + 1..] {
            let date_text = cell_text(row, COL_DATE);
            if date_text.is_empty()
                || date_text.starts_with("Total")
                || date_text.starts_with("Emerson")
            {
                continue;
            }
            let Some(date) = parse_flexible_date(date_text) else {
                continue;
            };

            let travel = safe_decimal(cell_text(row, COL_TRAVEL));
            let regular = safe_decimal(cell_text(row, COL_REGULAR));
            let overtime = safe_decimal(cell_text(row, COL_OVERTIME));
            let premier_ot = safe_decimal(cell_text(row, COL_PREMIER_OT));
            let stated_total = safe_decimal(cell_text(row, COL_TOTAL));

            let normal = travel + regular;

            if normal < Decimal::ZERO || overtime < Decimal::ZERO || premier_ot < Decimal::ZERO {
                errors.push(format!("{}: Negative hours on {date}", doc.source));
            }
            if normal + overtime + premier_ot > Decimal::from(24) {
                errors.push(format!("{}: Total hours > 24 on {date}", doc.source));
            }

            let computed_total = travel + regular + overtime + premier_ot;
            if stated_total > Decimal::ZERO
                && (computed_total - stated_total).abs() > *TOTAL_TOLERANCE
            {
                errors.push(format!(
                    "{}: Row total mismatch on {date}: computed={computed_total} vs stated={stated_total}",
                    doc.source
                ));
            }

            if normal > Decimal::ZERO || overtime > Decimal::ZERO || premier_ot > Decimal::ZERO {
                let (category, level) =
                    resolve_profile(directory, &engineer_name, inferred_category);
                entries.push(TimesheetEntry {
                    engineer_name: engineer_name.clone(),
                    date,
                    normal_hours: normal,
                    overtime_hours: overtime,
                    holiday_hours: premier_ot,
                    category,
                    level,
                    source: doc.source.clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(EngineError::validation(errors));
        }
        Ok(entries)
    }
}

/// Pulls the engineer name out of the labeled header line, stripping a
/// leading courtesy title.
fn extract_engineer_name(text: &str) -> Option<String> {
    let captured = ENGINEER_NAME_RE.captures(text)?;
    let raw = captured[1].trim();
    let name = COURTESY_TITLE_RE.replace(raw, "").trim().to_string();
    if name.is_empty() { None } else { Some(name) }
}

fn find_time_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().find(|table| {
        table
            .iter()
            .any(|row| row.iter().any(|c| c.as_deref().is_some_and(|c| c.contains("Regular"))))
    })
}

fn find_header_row(table: &Table) -> Option<usize> {
    table.iter().position(|row| {
        row.iter()
            .any(|c| c.as_deref().is_some_and(|c| c.contains("Regular")))
    })
}
