//! Aggregated invoice models: per-engineer blocks and the final result.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::contract::{Category, ContractData, EngineerLevel};
use super::entry::TimesheetEntry;

/// Rounds a monetary amount to 2 decimal places, half-up.
///
/// Half-up at the cent is the contractual rounding convention; banker's
/// rounding would disagree with the customer's own arithmetic.
///
/// # Example
///
/// ```
/// use invoice_engine::models::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("2.005").unwrap();
/// assert_eq!(round_money(amount), Decimal::from_str("2.01").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One engineer's merged entries plus resolved rates, ready for costing.
///
/// Each per-category cost is rounded independently and the block total is
/// the sum of the three rounded costs. Summing unrounded products and
/// rounding once would produce different cent-level results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineerBlock {
    /// The engineer's name.
    pub name: String,
    /// The engineer's deployment category.
    pub category: Category,
    /// The engineer's level.
    pub level: EngineerLevel,
    /// Merged entries, one per date, sorted by date.
    pub entries: Vec<TimesheetEntry>,
    /// Resolved rate for normal hours.
    pub normal_rate: Decimal,
    /// Resolved rate for overtime hours.
    pub overtime_rate: Decimal,
    /// Resolved rate for holiday hours.
    pub holiday_rate: Decimal,
}

impl EngineerBlock {
    /// Total normal hours across all entries.
    pub fn total_normal_hours(&self) -> Decimal {
        self.entries.iter().map(|e| e.normal_hours).sum()
    }

    /// Total overtime hours across all entries.
    pub fn total_overtime_hours(&self) -> Decimal {
        self.entries.iter().map(|e| e.overtime_hours).sum()
    }

    /// Total holiday hours across all entries.
    pub fn total_holiday_hours(&self) -> Decimal {
        self.entries.iter().map(|e| e.holiday_hours).sum()
    }

    /// Total hours across all pay categories.
    pub fn total_hours(&self) -> Decimal {
        self.total_normal_hours() + self.total_overtime_hours() + self.total_holiday_hours()
    }

    /// Cost of normal hours, rounded to the cent.
    pub fn normal_cost(&self) -> Decimal {
        round_money(self.total_normal_hours() * self.normal_rate)
    }

    /// Cost of overtime hours, rounded to the cent.
    pub fn overtime_cost(&self) -> Decimal {
        round_money(self.total_overtime_hours() * self.overtime_rate)
    }

    /// Cost of holiday hours, rounded to the cent.
    pub fn holiday_cost(&self) -> Decimal {
        round_money(self.total_holiday_hours() * self.holiday_rate)
    }

    /// Total cost: the sum of the three per-category rounded costs.
    pub fn total_cost(&self) -> Decimal {
        self.normal_cost() + self.overtime_cost() + self.holiday_cost()
    }
}

/// The final computed invoice.
///
/// Built once from validated entries and read-only afterward; the grand
/// total and aggregate hour totals are derived as sums over the blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceResult {
    /// The contract the invoice bills against.
    pub contract: ContractData,
    /// Per-engineer blocks, sorted by engineer name.
    pub engineer_blocks: Vec<EngineerBlock>,
    /// All distinct dates worked, sorted ascending.
    pub all_dates: Vec<NaiveDate>,
}

impl InvoiceResult {
    /// The grand total: the sum of per-block total costs.
    pub fn grand_total(&self) -> Decimal {
        self.engineer_blocks.iter().map(|b| b.total_cost()).sum()
    }

    /// Total normal hours across all blocks.
    pub fn total_normal_hours(&self) -> Decimal {
        self.engineer_blocks
            .iter()
            .map(|b| b.total_normal_hours())
            .sum()
    }

    /// Total overtime hours across all blocks.
    pub fn total_overtime_hours(&self) -> Decimal {
        self.engineer_blocks
            .iter()
            .map(|b| b.total_overtime_hours())
            .sum()
    }

    /// Total holiday hours across all blocks.
    pub fn total_holiday_hours(&self) -> Decimal {
        self.engineer_blocks
            .iter()
            .map(|b| b.total_holiday_hours())
            .sum()
    }

    /// Total hours across all blocks and pay categories.
    pub fn total_hours(&self) -> Decimal {
        self.total_normal_hours() + self.total_overtime_hours() + self.total_holiday_hours()
    }
}
