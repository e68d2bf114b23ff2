//! Contract document extraction.
//!
//! Pulls the contract number, maximum amount, standing hours, and the full
//! onshore/offshore rate schedule out of an extracted contract document.
//! Problems accumulate into one list; extraction only aborts early when the
//! price-list page itself is missing, since nothing downstream can be
//! recovered without it.

use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::document::{ExtractedDocument, Table};
use crate::error::{EngineError, EngineResult};
use crate::extract::cell_text;
use crate::models::{ContractData, EngineerLevel, RateSet};

static CONTRACT_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ContractNo[.\s]*(\d{7})").expect("valid regex"));

static MAX_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"MaximumAmount\s+([\d,]+\.\d{2})\s*USD").expect("valid regex"));

static STANDING_HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\s*hours").expect("valid regex"));

/// Default standing hours when the section header carries no "(N hours"
/// fragment; these are the figures the contract text states elsewhere.
const DEFAULT_ONSHORE_HOURS: u32 = 10;
const DEFAULT_OFFSHORE_HOURS: u32 = 12;

/// Which of the three pay categories a price-list item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RateKind {
    Normal,
    Overtime,
    Holiday,
}

impl RateKind {
    /// The label the contract's price list uses for this kind.
    fn label(self) -> &'static str {
        match self {
            RateKind::Normal => "Normal",
            RateKind::Overtime => "OT",
            RateKind::Holiday => "HOT",
        }
    }
}

/// Price-list item number → (engineer level, rate kind).
///
/// Items 4-6 are normal rates, 7-9 overtime, 10-12 holiday, each over
/// (principal, senior/lead, service/field) in that order.
const PRICE_ITEM_MAP: [(u32, EngineerLevel, RateKind); 9] = [
    (4, EngineerLevel::Principal, RateKind::Normal),
    (5, EngineerLevel::SeniorLead, RateKind::Normal),
    (6, EngineerLevel::ServiceField, RateKind::Normal),
    (7, EngineerLevel::Principal, RateKind::Overtime),
    (8, EngineerLevel::SeniorLead, RateKind::Overtime),
    (9, EngineerLevel::ServiceField, RateKind::Overtime),
    (10, EngineerLevel::Principal, RateKind::Holiday),
    (11, EngineerLevel::SeniorLead, RateKind::Holiday),
    (12, EngineerLevel::ServiceField, RateKind::Holiday),
];

fn item_for(level: EngineerLevel, kind: RateKind) -> u32 {
    // The map covers every (level, kind) pair exactly once; see the
    // completeness test below.
    PRICE_ITEM_MAP
        .iter()
        .find(|(_, l, k)| *l == level && *k == kind)
        .map(|(n, _, _)| *n)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Onshore,
    Offshore,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Onshore => "Onshore",
            Section::Offshore => "Offshore",
        }
    }
}

/// Extracts [`ContractData`] from a contract document.
///
/// # Errors
///
/// Returns [`EngineError::ValidationFailed`] carrying every extraction
/// problem found. A partially valid `ContractData` is never returned.
pub fn extract_contract(doc: &ExtractedDocument) -> EngineResult<ContractData> {
    let mut errors: Vec<String> = Vec::new();

    // Contract number from page 1.
    let contract_number = CONTRACT_NO_RE
        .captures(doc.first_page_text())
        .map(|c| c[1].to_string());
    if contract_number.is_none() {
        errors.push("Contract number not found on page 1".to_string());
    }

    // Maximum amount somewhere in the first few pages.
    let max_amount = doc
        .pages
        .iter()
        .take(4)
        .find_map(|page| MAX_AMOUNT_RE.captures(&page.text))
        .and_then(|c| Decimal::from_str(&c[1].replace(',', "")).ok());
    let max_amount = match max_amount {
        Some(amount) => amount,
        None => {
            errors.push("Maximum contract amount not found".to_string());
            Decimal::ZERO
        }
    };

    // The price-list page is required for everything downstream.
    let price_page = doc
        .pages
        .iter()
        .find(|page| page.text.contains("Price List") && page.text.contains("Unit Rate"));
    let Some(price_page) = price_page else {
        errors.push("Price List page not found in document".to_string());
        return Err(EngineError::validation(errors));
    };

    if price_page.tables.is_empty() {
        errors.push("No tables found on Price List page".to_string());
        return Err(EngineError::validation(errors));
    }

    let Some(price_table) = find_price_table(&price_page.tables) else {
        errors.push("Price table with headers not found".to_string());
        return Err(EngineError::validation(errors));
    };

    let mut onshore_hourly: BTreeMap<u32, Decimal> = BTreeMap::new();
    let mut offshore_hourly: BTreeMap<u32, Decimal> = BTreeMap::new();
    let mut onshore_hours_per_day = DEFAULT_ONSHORE_HOURS;
    let mut offshore_hours_per_day = DEFAULT_OFFSHORE_HOURS;
    let mut current_section: Option<Section> = None;

    for row in price_table {
        let item_id = cell_text(row, 0);
        if item_id.is_empty() {
            continue;
        }
        let description = cell_text(row, 2);

        // Section marker rows switch the active section and may carry the
        // standing hours fragment, e.g. "Onshore Services (10 hours/day)".
        if item_id == "A" && description.contains("Onshore") {
            current_section = Some(Section::Onshore);
            if let Some(hours) = parse_standing_hours(description) {
                onshore_hours_per_day = hours;
            }
            continue;
        }
        if item_id == "B" && description.contains("Offshore") {
            current_section = Some(Section::Offshore);
            if let Some(hours) = parse_standing_hours(description) {
                offshore_hours_per_day = hours;
            }
            continue;
        }

        let Some(section) = current_section else {
            continue;
        };
        let Ok(item_num) = item_id.parse::<u32>() else {
            continue;
        };

        let unit = cell_text(row, 1);
        if unit != "HR" || item_num < 4 {
            continue;
        }

        let rate_text = row
            .last()
            .and_then(|c| c.as_deref())
            .map_or("", str::trim);
        match Decimal::from_str(&rate_text.replace(',', "")) {
            Ok(rate) => {
                let table = match section {
                    Section::Onshore => &mut onshore_hourly,
                    Section::Offshore => &mut offshore_hourly,
                };
                table.insert(item_num, rate);
            }
            Err(_) => {
                errors.push(format!(
                    "Non-numeric rate for {} item {item_num}: '{rate_text}'",
                    section.label().to_lowercase()
                ));
            }
        }
    }

    let onshore_rates = build_rates(&onshore_hourly, Section::Onshore, &mut errors);
    let offshore_rates = build_rates(&offshore_hourly, Section::Offshore, &mut errors);

    // Final completeness checks over everything accumulated above.
    if contract_number.is_none() {
        errors.push("Contract number could not be extracted".to_string());
    }
    for level in EngineerLevel::ALL {
        if !onshore_rates.contains_key(&level) {
            errors.push(format!("Missing onshore rates for {level}"));
        }
        if !offshore_rates.contains_key(&level) {
            errors.push(format!("Missing offshore rates for {level}"));
        }
    }

    if !errors.is_empty() {
        return Err(EngineError::validation(errors));
    }

    Ok(ContractData {
        contract_number: contract_number.unwrap_or_default(),
        onshore_rates,
        offshore_rates,
        onshore_hours_per_day,
        offshore_hours_per_day,
        max_amount,
        source: doc.source.clone(),
    })
}

/// Finds the table containing both a "No" index header and a "Unit" header.
fn find_price_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().find(|table| {
        table.iter().any(|row| {
            cell_text(row, 0).contains("No")
                && row
                    .iter()
                    .any(|c| c.as_deref().is_some_and(|c| c.contains("Unit")))
        })
    })
}

fn parse_standing_hours(description: &str) -> Option<u32> {
    STANDING_HOURS_RE
        .captures(description)
        .and_then(|c| c[1].parse().ok())
}

/// Builds one category's rate table, accumulating an error for each level
/// with any missing or invalid rate kind. Incomplete levels are omitted,
/// never filled with placeholder zeros.
fn build_rates(
    hourly: &BTreeMap<u32, Decimal>,
    section: Section,
    errors: &mut Vec<String>,
) -> BTreeMap<EngineerLevel, RateSet> {
    let mut rates = BTreeMap::new();

    for level in EngineerLevel::ALL {
        let mut missing: Vec<String> = Vec::new();
        let mut found: Vec<Decimal> = Vec::new();

        for kind in [RateKind::Normal, RateKind::Overtime, RateKind::Holiday] {
            let item = item_for(level, kind);
            match hourly.get(&item) {
                Some(rate) => found.push(*rate),
                None => missing.push(format!("{} (item {item})", kind.label())),
            }
        }

        if !missing.is_empty() {
            errors.push(format!(
                "{} {level}: missing rates for {}",
                section.label(),
                missing.join(", ")
            ));
            continue;
        }

        match RateSet::new(found[0], found[1], found[2]) {
            Ok(rate_set) => {
                rates.insert(level, rate_set);
            }
            Err(err) => {
                for problem in err.problems() {
                    errors.push(format!("{} {level}: {problem}", section.label()));
                }
            }
        }
    }

    rates
}
