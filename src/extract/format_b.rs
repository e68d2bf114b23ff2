//! Format B extraction: the "SERVICE TIME SHEET" site-hours layout.
//!
//! Two sub-variants share the same column meanings but different shapes:
//!
//! - the from/to variant carries HH:MM start and end times, with travel,
//!   weekend, and Saturday hours in the cells after them;
//! - the site-hours variant carries the on-site hour count directly.
//!
//! Mapping: site hours + travel → normal, weekend column → overtime,
//! Saturday column → holiday. These sheets are usually scans, so date
//! cells go through the OCR-tolerant recovery in [`super::dates`].

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::config::EngineerDirectory;
use crate::document::{ExtractedDocument, Table};
use crate::error::{EngineError, EngineResult};
use crate::extract::dates::date_components_from_cell;
use crate::extract::names::extract_name_format_b;
use crate::extract::timesheet::{ExtractionStrategy, resolve_profile};
use crate::extract::{cell_text, detect_category, safe_decimal};
use crate::models::TimesheetEntry;

static TIME_OF_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}").expect("valid regex"));

/// Markers that end the data rows; everything after is footer material.
const FOOTER_MARKERS: [&str; 3] = ["SPARES", "TOTAL", "HEALTH"];

/// The Format B extraction strategy.
pub(crate) struct FormatB;

impl ExtractionStrategy for FormatB {
    fn extract(
        &self,
        doc: &ExtractedDocument,
        directory: &EngineerDirectory,
    ) -> EngineResult<Vec<TimesheetEntry>> {
        let mut entries = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        let text = doc.first_page_text();
        let tables = doc.pages.first().map(|p| p.tables.as_slice()).unwrap_or(&[]);

        let Some(engineer_name) = extract_name_format_b(text, &doc.source, directory) else {
            return Err(EngineError::validation(vec![format!(
                "Cannot extract engineer name from timesheet: {}",
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
                "Header row not found in {}",
                doc.source
            )]));
        };

        // Two header lines precede the data rows.
        for row in time_table.iter().skip(header_idx + 2) {
            let first_cell = cell_text(row, 0);
            if first_cell.is_empty() {
                continue;
            }
            if FOOTER_MARKERS.iter().any(|m| first_cell.contains(m)) {
                break;
            }

            let Some((year, month, day)) = date_components_from_cell(first_cell) else {
                continue;
            };
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                errors.push(format!("{}: Invalid date {day}/{month}/{year}", doc.source));
                continue;
            };

            let (site_hours, travel, weekend, saturday) = read_hour_columns(row);

            let normal = site_hours + travel;
            let overtime = weekend;
            let holiday = saturday;

            if normal < Decimal::ZERO || overtime < Decimal::ZERO || holiday < Decimal::ZERO {
                errors.push(format!("{}: Negative hours on {date}", doc.source));
            }
            let total = normal + overtime + holiday;
            if total > Decimal::from(24) {
                errors.push(format!(
                    "{}: Total hours > 24 on {date}: {total}",
                    doc.source
                ));
            }

            if normal > Decimal::ZERO || overtime > Decimal::ZERO || holiday > Decimal::ZERO {
                let (category, level) =
                    resolve_profile(directory, &engineer_name, inferred_category);
                entries.push(TimesheetEntry {
                    engineer_name: engineer_name.clone(),
                    date,
                    normal_hours: normal,
                    overtime_hours: overtime,
                    holiday_hours: holiday,
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

/// Reads `(site hours, travel, weekend, saturday)` from a data row,
/// detecting which sub-variant the row uses.
fn read_hour_columns(row: &[Option<String>]) -> (Decimal, Decimal, Decimal, Decimal) {
    let third_cell = cell_text(row, 2);
    let is_from_to_layout = row.len() >= 10 && TIME_OF_DAY_RE.is_match(third_cell);

    if is_from_to_layout {
        // DATE | _ | FROM | TO | A(TRAV) | B(WKD/FRI) | _ | C(SAT) | ...
        let site_hours = hours_between(third_cell, cell_text(row, 3));
        let travel = safe_decimal(cell_text(row, 4));
        let weekend = safe_decimal(cell_text(row, 5));
        let saturday = safe_decimal(cell_text(row, 7));
        return (site_hours, travel, weekend, saturday);
    }

    if row.len() >= 8 {
        // DATE | _ | HOURS ON SITE | A(TRAV) | B(WKD/FRI) | C(SAT) | ...
        let site_hours = safe_decimal(cell_text(row, 2));
        let travel = safe_decimal(cell_text(row, 3));
        let weekend = safe_decimal(cell_text(row, 4));
        let saturday = safe_decimal(cell_text(row, 5));
        return (site_hours, travel, weekend, saturday);
    }

    (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
}

/// Hours between two HH:MM times, wrapping past midnight. Malformed times
/// read as zero hours.
fn hours_between(from: &str, to: &str) -> Decimal {
    let Some(from_minutes) = minutes_of_day(from) else {
        return Decimal::ZERO;
    };
    let Some(to_minutes) = minutes_of_day(to) else {
        return Decimal::ZERO;
    };

    let mut diff = to_minutes - from_minutes;
    if diff < 0 {
        diff += 24 * 60;
    }
    Decimal::from(diff) / Decimal::from(60)
}

fn minutes_of_day(time: &str) -> Option<i64> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    Some(hours * 60 + minutes)
}

fn find_time_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().find(|table| {
        table
            .iter()
            .any(|row| row.iter().any(|c| c.as_deref().is_some_and(|c| c.contains("DATE"))))
    })
}

fn find_header_row(table: &Table) -> Option<usize> {
    table.iter().position(|row| {
        row.iter()
            .any(|c| c.as_deref().is_some_and(|c| c.contains("DATE")))
    })
}
