//! Canonical timesheet entry model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::contract::{Category, EngineerLevel};

/// One engineer's hours for one calendar date, in canonical form.
///
/// Entries are never mutated in place: every transformation (hours
/// splitting, same-day merging) constructs a fresh entry so the original
/// extraction survives as an audit trail.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use invoice_engine::models::{Category, EngineerLevel, TimesheetEntry};
/// use rust_decimal::Decimal;
///
/// let entry = TimesheetEntry {
///     engineer_name: "Suraj Negi".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     normal_hours: Decimal::new(10, 0),
///     overtime_hours: Decimal::new(2, 0),
///     holiday_hours: Decimal::ZERO,
///     category: Category::Offshore,
///     level: EngineerLevel::ServiceField,
///     source: "week_3.pdf".to_string(),
/// };
/// assert_eq!(entry.total_hours(), Decimal::new(12, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetEntry {
    /// The engineer this entry belongs to.
    pub engineer_name: String,
    /// The calendar date worked.
    pub date: NaiveDate,
    /// Hours billed at the normal rate.
    pub normal_hours: Decimal,
    /// Hours billed at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours billed at the holiday rate.
    pub holiday_hours: Decimal,
    /// The engineer's deployment category.
    pub category: Category,
    /// The engineer's level.
    pub level: EngineerLevel,
    /// Identifier of the source document this entry was extracted from.
    pub source: String,
}

impl TimesheetEntry {
    /// Total hours across all three pay categories.
    pub fn total_hours(&self) -> Decimal {
        self.normal_hours + self.overtime_hours + self.holiday_hours
    }

    /// Reconstructs this entry with a different hour split, preserving
    /// every other field.
    pub fn with_hours(&self, normal: Decimal, overtime: Decimal, holiday: Decimal) -> Self {
        Self {
            engineer_name: self.engineer_name.clone(),
            date: self.date,
            normal_hours: normal,
            overtime_hours: overtime,
            holiday_hours: holiday,
            category: self.category,
            level: self.level,
            source: self.source.clone(),
        }
    }
}
