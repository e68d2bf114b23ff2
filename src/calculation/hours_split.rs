//! Work-week hours splitting.
//!
//! The supported jurisdiction works Sunday through Thursday; Friday is the
//! weekly holiday and Saturday is the weekend. Sheets that only report a
//! raw daily hour count get that count split into pay categories here:
//!
//! - Friday: all hours are holiday hours.
//! - Saturday: all hours are overtime hours.
//! - Sunday-Thursday: the first `standing_hours` are normal, the rest is
//!   overtime.
//!
//! Entries that already carry a non-zero overtime or holiday value were
//! split by the extractor from explicit columns; that split is
//! authoritative and passes through untouched.

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;

use crate::models::{ContractData, TimesheetEntry};

/// Splits one entry's raw hours into pay categories by weekday.
///
/// Pure: returns a freshly constructed entry (or the input unchanged) and
/// preserves every non-hour field.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use invoice_engine::calculation::split_hours;
/// use invoice_engine::models::{Category, EngineerLevel, TimesheetEntry};
/// use rust_decimal::Decimal;
///
/// let entry = TimesheetEntry {
///     engineer_name: "Atif".to_string(),
///     // 2026-01-13 is a Tuesday.
///     date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     normal_hours: Decimal::new(14, 0),
///     overtime_hours: Decimal::ZERO,
///     holiday_hours: Decimal::ZERO,
///     category: Category::Onshore,
///     level: EngineerLevel::ServiceField,
///     source: "ts.pdf".to_string(),
/// };
///
/// let split = split_hours(&entry, 10);
/// assert_eq!(split.normal_hours, Decimal::new(10, 0));
/// assert_eq!(split.overtime_hours, Decimal::new(4, 0));
/// ```
pub fn split_hours(entry: &TimesheetEntry, standing_hours: u32) -> TimesheetEntry {
    let total = entry.total_hours();

    if total == Decimal::ZERO {
        return entry.clone();
    }
    // An explicit split from the extractor is authoritative.
    if entry.overtime_hours > Decimal::ZERO || entry.holiday_hours > Decimal::ZERO {
        return entry.clone();
    }

    match entry.date.weekday() {
        Weekday::Fri => entry.with_hours(Decimal::ZERO, Decimal::ZERO, total),
        Weekday::Sat => entry.with_hours(Decimal::ZERO, total, Decimal::ZERO),
        _ => {
            let standing = Decimal::from(standing_hours);
            let normal = total.min(standing);
            let overtime = total - normal;
            entry.with_hours(normal, overtime, Decimal::ZERO)
        }
    }
}

/// Splits a batch of entries, sourcing each entry's standing hours from
/// the contract by category.
pub fn apply_hours_split(
    entries: &[TimesheetEntry],
    contract: &ContractData,
) -> Vec<TimesheetEntry> {
    entries
        .iter()
        .map(|entry| split_hours(entry, contract.standing_hours_for(entry.category)))
        .collect()
}
