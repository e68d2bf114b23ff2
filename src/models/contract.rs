//! Contract-side models: categories, engineer levels, and rate schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};

/// The deployment category of an engineer.
///
/// Each category has its own rate table and its own standing work-day
/// length in the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Deployed onshore (land-based site).
    Onshore,
    /// Deployed offshore (platform or vessel).
    Offshore,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Onshore => write!(f, "onshore"),
            Category::Offshore => write!(f, "offshore"),
        }
    }
}

/// The seniority level of an engineer.
///
/// Selects which row of a category's rate table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineerLevel {
    /// Principal engineer.
    Principal,
    /// Senior or lead engineer.
    SeniorLead,
    /// Service or field engineer.
    ServiceField,
}

impl EngineerLevel {
    /// All levels, in rate-table order.
    pub const ALL: [EngineerLevel; 3] = [
        EngineerLevel::Principal,
        EngineerLevel::SeniorLead,
        EngineerLevel::ServiceField,
    ];
}

impl std::fmt::Display for EngineerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineerLevel::Principal => write!(f, "principal"),
            EngineerLevel::SeniorLead => write!(f, "senior_lead"),
            EngineerLevel::ServiceField => write!(f, "service_field"),
        }
    }
}

/// Hourly rates for one engineer level in one category.
///
/// All three rates are strictly positive; construction enforces this.
///
/// # Example
///
/// ```
/// use invoice_engine::models::RateSet;
/// use rust_decimal::Decimal;
///
/// let rates = RateSet::new(
///     Decimal::new(286, 0),
///     Decimal::new(372, 0),
///     Decimal::new(443, 0),
/// ).unwrap();
/// assert_eq!(rates.normal(), Decimal::new(286, 0));
///
/// assert!(RateSet::new(Decimal::ZERO, Decimal::ONE, Decimal::ONE).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateSet {
    normal: Decimal,
    overtime: Decimal,
    holiday: Decimal,
}

impl RateSet {
    /// Creates a rate set, rejecting any non-positive rate.
    pub fn new(normal: Decimal, overtime: Decimal, holiday: Decimal) -> EngineResult<Self> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("normal", normal),
            ("overtime", overtime),
            ("holiday", holiday),
        ] {
            if value <= Decimal::ZERO {
                errors.push(format!("Rate '{name}' must be positive, got {value}"));
            }
        }
        if !errors.is_empty() {
            return Err(EngineError::validation(errors));
        }
        Ok(Self {
            normal,
            overtime,
            holiday,
        })
    }

    /// The rate for normal hours.
    pub fn normal(&self) -> Decimal {
        self.normal
    }

    /// The rate for overtime hours.
    pub fn overtime(&self) -> Decimal {
        self.overtime
    }

    /// The rate for holiday (weekend/public holiday) hours.
    pub fn holiday(&self) -> Decimal {
        self.holiday
    }
}

/// Extracted and validated contract data.
///
/// Immutable once extracted; everything downstream reads rates and
/// standing hours from here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractData {
    /// The 7-digit contract number.
    pub contract_number: String,
    /// Onshore rate table, one row per engineer level.
    pub onshore_rates: BTreeMap<EngineerLevel, RateSet>,
    /// Offshore rate table, one row per engineer level.
    pub offshore_rates: BTreeMap<EngineerLevel, RateSet>,
    /// Hours per working day billed at the normal rate for onshore work.
    pub onshore_hours_per_day: u32,
    /// Hours per working day billed at the normal rate for offshore work.
    pub offshore_hours_per_day: u32,
    /// The maximum contract amount.
    pub max_amount: Decimal,
    /// Identifier of the source document.
    pub source: String,
}

impl ContractData {
    /// Returns the rate table for a category.
    pub fn rates_for(&self, category: Category) -> &BTreeMap<EngineerLevel, RateSet> {
        match category {
            Category::Onshore => &self.onshore_rates,
            Category::Offshore => &self.offshore_rates,
        }
    }

    /// Returns the standing hours per day for a category.
    pub fn standing_hours_for(&self, category: Category) -> u32 {
        match category {
            Category::Onshore => self.onshore_hours_per_day,
            Category::Offshore => self.offshore_hours_per_day,
        }
    }
}
