//! Strict validation of the merged entry list before any money is computed.
//!
//! Every check runs over the whole batch and every violation is reported;
//! validation never stops at the first problem. The stage is a pure
//! pass/fail gate and leaves the entries untouched.
//!
//! Hour values are `Decimal`s, so non-finite values are unrepresentable
//! and need no runtime check.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EngineError, EngineResult};
use crate::models::{Category, ContractData, EngineerLevel, TimesheetEntry};

/// Validates timesheet entries against the contract.
///
/// # Errors
///
/// Returns [`EngineError::ValidationFailed`] listing every violation of:
///
/// - no negative hour value in any pay category,
/// - no single entry totalling more than 24 hours,
/// - no (engineer, date) pair totalling more than 24 hours across all
///   source documents combined,
/// - a contract rate exists for every (category, level) present,
/// - at least one source identifier is recorded,
/// - the entry list is not empty (reported on its own, immediately).
pub fn validate_entries(entries: &[TimesheetEntry], contract: &ContractData) -> EngineResult<()> {
    if entries.is_empty() {
        return Err(EngineError::validation(vec![
            "No timesheet entries extracted from any document".to_string(),
        ]));
    }

    let mut errors: Vec<String> = Vec::new();

    for entry in entries {
        for (label, value) in [
            ("normal_hours", entry.normal_hours),
            ("overtime_hours", entry.overtime_hours),
            ("holiday_hours", entry.holiday_hours),
        ] {
            if value < Decimal::ZERO {
                errors.push(format!(
                    "{} on {}: negative {label}={value} (source: {})",
                    entry.engineer_name, entry.date, entry.source
                ));
            }
        }

        if entry.total_hours() > Decimal::from(24) {
            errors.push(format!(
                "{} on {}: total hours={} > 24 (source: {})",
                entry.engineer_name,
                entry.date,
                entry.total_hours(),
                entry.source
            ));
        }
    }

    // The per-entry cap cannot see an engineer split across documents;
    // aggregate per (engineer, date) to catch overlapping submissions.
    let mut daily_totals: BTreeMap<(&str, NaiveDate), Decimal> = BTreeMap::new();
    for entry in entries {
        *daily_totals
            .entry((entry.engineer_name.as_str(), entry.date))
            .or_default() += entry.total_hours();
    }
    for ((name, date), total) in &daily_totals {
        if *total > Decimal::from(24) {
            errors.push(format!(
                "{name} on {date}: aggregated daily total={total} > 24 across all source documents"
            ));
        }
    }

    let present: BTreeSet<(Category, EngineerLevel)> = entries
        .iter()
        .map(|entry| (entry.category, entry.level))
        .collect();
    for (category, level) in present {
        if !contract.rates_for(category).contains_key(&level) {
            errors.push(format!(
                "No {category} rates found for engineer level {level} in contract"
            ));
        }
    }

    if entries.iter().all(|entry| entry.source.is_empty()) {
        errors.push("No source documents recorded in entries".to_string());
    }

    if !errors.is_empty() {
        return Err(EngineError::validation(errors));
    }
    Ok(())
}
