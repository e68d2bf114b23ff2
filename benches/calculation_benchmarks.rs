//! Benchmarks for the post-extraction calculation stages.

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use invoice_engine::calculation::{apply_hours_split, calculate_invoice, validate_entries};
use invoice_engine::models::{Category, ContractData, EngineerLevel, RateSet, TimesheetEntry};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_contract() -> ContractData {
    let mut onshore = BTreeMap::new();
    let mut offshore = BTreeMap::new();
    for level in EngineerLevel::ALL {
        onshore.insert(level, RateSet::new(dec("286"), dec("372"), dec("443")).unwrap());
        offshore.insert(level, RateSet::new(dec("372"), dec("484"), dec("577")).unwrap());
    }
    ContractData {
        contract_number: "1535984".to_string(),
        onshore_rates: onshore,
        offshore_rates: offshore,
        onshore_hours_per_day: 10,
        offshore_hours_per_day: 12,
        max_amount: dec("131000.00"),
        source: "contract.pdf".to_string(),
    }
}

/// A month of raw daily entries for `engineers` engineers.
fn sample_entries(engineers: usize) -> Vec<TimesheetEntry> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let mut entries = Vec::new();
    for engineer in 0..engineers {
        for day in 0..30u64 {
            entries.push(TimesheetEntry {
                engineer_name: format!("Engineer {engineer:02}"),
                date: start + chrono::Days::new(day),
                normal_hours: dec("11.5"),
                overtime_hours: Decimal::ZERO,
                holiday_hours: Decimal::ZERO,
                category: Category::Onshore,
                level: EngineerLevel::ServiceField,
                source: format!("engineer_{engineer:02}_jan.pdf"),
            });
        }
    }
    entries
}

fn bench_hours_split(c: &mut Criterion) {
    let contract = sample_contract();
    let entries = sample_entries(10);

    c.bench_function("hours_split_300_entries", |b| {
        b.iter(|| apply_hours_split(black_box(&entries), black_box(&contract)))
    });
}

fn bench_validate(c: &mut Criterion) {
    let contract = sample_contract();
    let entries = apply_hours_split(&sample_entries(10), &contract);

    c.bench_function("validate_300_entries", |b| {
        b.iter(|| validate_entries(black_box(&entries), black_box(&contract)))
    });
}

fn bench_calculate(c: &mut Criterion) {
    let contract = sample_contract();
    let entries = apply_hours_split(&sample_entries(10), &contract);

    c.bench_function("calculate_invoice_10_engineers", |b| {
        b.iter(|| calculate_invoice(black_box(&entries), black_box(&contract)))
    });
}

fn bench_full_calculation_path(c: &mut Criterion) {
    let contract = sample_contract();
    let entries = sample_entries(25);

    c.bench_function("split_validate_calculate_25_engineers", |b| {
        b.iter(|| {
            let split = apply_hours_split(black_box(&entries), &contract);
            validate_entries(&split, &contract).unwrap();
            calculate_invoice(&split, &contract).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_hours_split,
    bench_validate,
    bench_calculate,
    bench_full_calculation_path
);
criterion_main!(benches);
