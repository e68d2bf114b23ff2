//! Financial calculation.
//!
//! Groups validated entries into per-engineer blocks, merges same-day
//! entries, resolves rates from the contract, and assembles the
//! [`InvoiceResult`]. All money stays in [`Decimal`] end to end; the only
//! rounding happens inside the block cost accessors, per category, before
//! costs are summed.
//!
//! A reconciliation pass re-derives the grand total and the three hour
//! totals from the blocks and fails the run on any disagreement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Category, ContractData, EngineerBlock, EngineerLevel, InvoiceResult, TimesheetEntry,
};

/// Builds the invoice from validated entries and contract rates.
///
/// Engineers are processed in name order, so output is deterministic for
/// a given input regardless of entry order.
///
/// # Errors
///
/// Returns [`EngineError::ValidationFailed`] when an engineer's entries
/// mix categories or levels, when the contract carries no rate set for an
/// engineer's (category, level), or when the reconciliation pass finds a
/// total that does not re-derive.
pub fn calculate_invoice(
    entries: &[TimesheetEntry],
    contract: &ContractData,
) -> EngineResult<InvoiceResult> {
    let mut errors: Vec<String> = Vec::new();

    let mut by_engineer: BTreeMap<&str, Vec<&TimesheetEntry>> = BTreeMap::new();
    for entry in entries {
        by_engineer
            .entry(entry.engineer_name.as_str())
            .or_default()
            .push(entry);
    }

    let mut engineer_blocks: Vec<EngineerBlock> = Vec::new();

    for (name, eng_entries) in &by_engineer {
        let categories: BTreeSet<Category> =
            eng_entries.iter().map(|e| e.category).collect();
        let levels: BTreeSet<EngineerLevel> = eng_entries.iter().map(|e| e.level).collect();

        if categories.len() > 1 {
            errors.push(format!(
                "Engineer {name} has mixed categories: {}",
                join_sorted(&categories)
            ));
        }
        if levels.len() > 1 {
            errors.push(format!(
                "Engineer {name} has mixed levels: {}",
                join_sorted(&levels)
            ));
        }

        let category = eng_entries[0].category;
        let level = eng_entries[0].level;

        let Some(rates) = contract.rates_for(category).get(&level) else {
            errors.push(format!("No rates for {name} ({category}, {level})"));
            continue;
        };

        engineer_blocks.push(EngineerBlock {
            name: (*name).to_string(),
            category,
            level,
            entries: merge_by_date(eng_entries),
            normal_rate: rates.normal(),
            overtime_rate: rates.overtime(),
            holiday_rate: rates.holiday(),
        });
    }

    if !errors.is_empty() {
        return Err(EngineError::validation(errors));
    }

    let all_dates: Vec<NaiveDate> = entries
        .iter()
        .map(|e| e.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let result = InvoiceResult {
        contract: contract.clone(),
        engineer_blocks,
        all_dates,
    };

    reconcile(&result)?;
    Ok(result)
}

/// Sums same-day entries for one engineer into a single entry, chaining
/// source identifiers with "; ".
fn merge_by_date(entries: &[&TimesheetEntry]) -> Vec<TimesheetEntry> {
    let mut by_date: BTreeMap<NaiveDate, TimesheetEntry> = BTreeMap::new();
    for entry in entries {
        by_date
            .entry(entry.date)
            .and_modify(|existing| {
                existing.normal_hours += entry.normal_hours;
                existing.overtime_hours += entry.overtime_hours;
                existing.holiday_hours += entry.holiday_hours;
                existing.source = format!("{}; {}", existing.source, entry.source);
            })
            .or_insert_with(|| (*entry).clone());
    }
    by_date.into_values().collect()
}

/// Re-derives every result-level total from the engineer blocks and fails
/// on any disagreement. With the accessors deriving from the same data
/// this can only trip on a future regression, which is exactly when it
/// has to.
fn reconcile(result: &InvoiceResult) -> EngineResult<()> {
    let mut errors: Vec<String> = Vec::new();

    let blocks = &result.engineer_blocks;
    let cost_sum: Decimal = blocks.iter().map(EngineerBlock::total_cost).sum();
    if cost_sum != result.grand_total() {
        errors.push(format!(
            "Grand total mismatch: sum of engineers={cost_sum} vs computed={}",
            result.grand_total()
        ));
    }

    let normal: Decimal = blocks.iter().map(EngineerBlock::total_normal_hours).sum();
    let overtime: Decimal = blocks.iter().map(EngineerBlock::total_overtime_hours).sum();
    let holiday: Decimal = blocks.iter().map(EngineerBlock::total_holiday_hours).sum();

    if normal != result.total_normal_hours() {
        errors.push(format!(
            "Normal hours mismatch: {normal} vs {}",
            result.total_normal_hours()
        ));
    }
    if overtime != result.total_overtime_hours() {
        errors.push(format!(
            "Overtime hours mismatch: {overtime} vs {}",
            result.total_overtime_hours()
        ));
    }
    if holiday != result.total_holiday_hours() {
        errors.push(format!(
            "Holiday hours mismatch: {holiday} vs {}",
            result.total_holiday_hours()
        ));
    }

    if !errors.is_empty() {
        return Err(EngineError::validation(errors));
    }
    Ok(())
}

fn join_sorted<T: std::fmt::Display>(values: &BTreeSet<T>) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
