//! Audit report generation.
//!
//! Builds a full-traceability report from a computed [`InvoiceResult`]:
//! every figure on the invoice traces back to its source document, rates,
//! and per-date entries. The report is a plain serializable tree so
//! callers can emit JSON or embed it elsewhere.
//!
//! Monetary and hour values serialize as decimal strings, never floats,
//! so the report shows the exact amounts the engine computed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Category, EngineerLevel, InvoiceResult};

/// One rate set as it appears in the report.
#[derive(Debug, Serialize)]
pub struct AuditRates {
    /// Hourly rate for normal hours.
    pub normal: Decimal,
    /// Hourly rate for overtime hours.
    pub overtime: Decimal,
    /// Hourly rate for holiday hours.
    pub holiday: Decimal,
}

/// Hour totals by pay category.
#[derive(Debug, Serialize)]
pub struct AuditHours {
    /// Normal hours.
    pub normal: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
    /// Holiday hours.
    pub holiday: Decimal,
    /// Sum of the three categories.
    pub total: Decimal,
}

/// Cost totals by pay category, each rounded to the cent.
#[derive(Debug, Serialize)]
pub struct AuditCosts {
    /// Cost of normal hours.
    pub normal: Decimal,
    /// Cost of overtime hours.
    pub overtime: Decimal,
    /// Cost of holiday hours.
    pub holiday: Decimal,
    /// Sum of the three rounded category costs.
    pub total: Decimal,
}

/// One merged per-date entry with its source trail.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// The work date.
    pub date: NaiveDate,
    /// Normal hours on this date.
    pub normal_hours: Decimal,
    /// Overtime hours on this date.
    pub overtime_hours: Decimal,
    /// Holiday hours on this date.
    pub holiday_hours: Decimal,
    /// Total hours on this date.
    pub total_hours: Decimal,
    /// Source document(s) the entry came from.
    pub source: String,
}

/// One engineer's full breakdown.
#[derive(Debug, Serialize)]
pub struct AuditEngineer {
    /// The engineer's name.
    pub name: String,
    /// Deployment category.
    pub category: Category,
    /// Engineer level.
    pub level: EngineerLevel,
    /// The rates the costs were computed with.
    pub rates: AuditRates,
    /// Hour totals.
    pub hours: AuditHours,
    /// Cost totals.
    pub costs: AuditCosts,
    /// Distinct source documents, sorted.
    pub source_files: Vec<String>,
    /// Per-date entries, sorted by date.
    pub entries: Vec<AuditEntry>,
}

/// Invoice-level summary figures.
#[derive(Debug, Serialize)]
pub struct AuditSummary {
    /// Number of engineers billed.
    pub total_engineers: usize,
    /// Normal hours across all engineers.
    pub total_normal_hours: Decimal,
    /// Overtime hours across all engineers.
    pub total_overtime_hours: Decimal,
    /// Holiday hours across all engineers.
    pub total_holiday_hours: Decimal,
    /// All hours across all engineers.
    pub total_hours: Decimal,
    /// The invoice grand total in USD.
    pub grand_total_usd: Decimal,
}

/// The span of dates the invoice covers.
#[derive(Debug, Serialize)]
pub struct AuditDateRange {
    /// Earliest date worked, if any.
    pub start: Option<NaiveDate>,
    /// Latest date worked, if any.
    pub end: Option<NaiveDate>,
    /// Number of distinct dates worked.
    pub total_dates: usize,
}

/// The complete audit report.
#[derive(Debug, Serialize)]
pub struct AuditReport {
    /// The contract number billed against.
    pub contract_number: String,
    /// The document the contract was extracted from.
    pub contract_source: String,
    /// The contract's maximum amount in USD.
    pub max_contract_amount_usd: Decimal,
    /// Every rate set extracted from the contract, by category and level.
    pub rates_used: BTreeMap<Category, BTreeMap<EngineerLevel, AuditRates>>,
    /// Per-engineer breakdowns, in invoice order.
    pub engineers: Vec<AuditEngineer>,
    /// Invoice-level totals.
    pub summary: AuditSummary,
    /// The span of dates worked.
    pub date_range: AuditDateRange,
    /// Every distinct source document across all entries, sorted.
    pub source_files: Vec<String>,
}

impl AuditReport {
    /// Builds the report from a computed invoice. Pure; no I/O.
    pub fn from_result(result: &InvoiceResult) -> Self {
        let engineers: Vec<AuditEngineer> = result
            .engineer_blocks
            .iter()
            .map(|block| {
                let mut entries = block.entries.clone();
                entries.sort_by_key(|e| e.date);

                AuditEngineer {
                    name: block.name.clone(),
                    category: block.category,
                    level: block.level,
                    rates: AuditRates {
                        normal: block.normal_rate,
                        overtime: block.overtime_rate,
                        holiday: block.holiday_rate,
                    },
                    hours: AuditHours {
                        normal: block.total_normal_hours(),
                        overtime: block.total_overtime_hours(),
                        holiday: block.total_holiday_hours(),
                        total: block.total_hours(),
                    },
                    costs: AuditCosts {
                        normal: block.normal_cost(),
                        overtime: block.overtime_cost(),
                        holiday: block.holiday_cost(),
                        total: block.total_cost(),
                    },
                    source_files: distinct_sources(block.entries.iter().map(|e| &e.source)),
                    entries: entries
                        .iter()
                        .map(|e| AuditEntry {
                            date: e.date,
                            normal_hours: e.normal_hours,
                            overtime_hours: e.overtime_hours,
                            holiday_hours: e.holiday_hours,
                            total_hours: e.total_hours(),
                            source: e.source.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        let mut rates_used = BTreeMap::new();
        for category in [Category::Onshore, Category::Offshore] {
            let by_level: BTreeMap<EngineerLevel, AuditRates> = result
                .contract
                .rates_for(category)
                .iter()
                .map(|(level, rates)| {
                    (
                        *level,
                        AuditRates {
                            normal: rates.normal(),
                            overtime: rates.overtime(),
                            holiday: rates.holiday(),
                        },
                    )
                })
                .collect();
            rates_used.insert(category, by_level);
        }

        AuditReport {
            contract_number: result.contract.contract_number.clone(),
            contract_source: result.contract.source.clone(),
            max_contract_amount_usd: result.contract.max_amount,
            rates_used,
            summary: AuditSummary {
                total_engineers: result.engineer_blocks.len(),
                total_normal_hours: result.total_normal_hours(),
                total_overtime_hours: result.total_overtime_hours(),
                total_holiday_hours: result.total_holiday_hours(),
                total_hours: result.total_hours(),
                grand_total_usd: result.grand_total(),
            },
            date_range: AuditDateRange {
                start: result.all_dates.first().copied(),
                end: result.all_dates.last().copied(),
                total_dates: result.all_dates.len(),
            },
            source_files: distinct_sources(
                result
                    .engineer_blocks
                    .iter()
                    .flat_map(|b| b.entries.iter().map(|e| &e.source)),
            ),
            engineers,
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ValidationFailed`] if serialization fails,
    /// which with this report shape indicates a bug rather than bad input.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::validation(vec![format!("Audit serialization failed: {e}")]))
    }
}

/// Writes the audit report for a result as JSON to `path`.
///
/// # Errors
///
/// Fails on serialization or filesystem errors.
pub fn write_audit(result: &InvoiceResult, path: &Path) -> EngineResult<()> {
    let report = AuditReport::from_result(result);
    let json = report.to_json()?;
    fs::write(path, json).map_err(|e| {
        EngineError::validation(vec![format!("Cannot write audit file {}: {e}", path.display())])
    })?;
    tracing::info!(path = %path.display(), "audit report written");
    Ok(())
}

/// Merged entries carry "; "-joined source chains; split them back out so
/// the report lists each underlying document once.
fn distinct_sources<'a>(sources: impl Iterator<Item = &'a String>) -> Vec<String> {
    let set: BTreeSet<String> = sources
        .flat_map(|s| s.split("; "))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    set.into_iter().collect()
}
