//! End-to-end pipeline tests over synthetic extracted documents.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use invoice_engine::audit::AuditReport;
use invoice_engine::config::{EngineerDirectory, EngineerProfile};
use invoice_engine::document::{ExtractedDocument, Page, Table};
use invoice_engine::models::{Category, EngineerLevel};
use invoice_engine::pipeline::generate_invoice;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn cell(text: &str) -> Option<String> {
    Some(text.to_string())
}

fn contract_doc() -> ExtractedDocument {
    let mut table: Table = vec![
        vec![cell("No"), cell("Unit"), cell("Description"), cell("Unit Rate")],
        vec![cell("A"), None, cell("Onshore Services (10 hours/day)"), None],
    ];
    for (item, rate) in [
        ("4", "385.00"),
        ("5", "330.00"),
        ("6", "286.00"),
        ("7", "500.00"),
        ("8", "429.00"),
        ("9", "372.00"),
        ("10", "596.00"),
        ("11", "511.00"),
        ("12", "443.00"),
    ] {
        table.push(vec![cell(item), cell("HR"), cell("Hourly rate"), cell(rate)]);
    }
    table.push(vec![
        cell("B"),
        None,
        cell("Offshore Services (12 hours/day)"),
        None,
    ]);
    for (item, rate) in [
        ("4", "500.00"),
        ("5", "429.00"),
        ("6", "372.00"),
        ("7", "650.00"),
        ("8", "558.00"),
        ("9", "484.00"),
        ("10", "775.00"),
        ("11", "665.00"),
        ("12", "577.00"),
    ] {
        table.push(vec![cell(item), cell("HR"), cell("Hourly rate"), cell(rate)]);
    }

    ExtractedDocument {
        source: "contract_1535984.pdf".to_string(),
        pages: vec![
            Page {
                text: "ContractNo. 1535984\nMaximumAmount 131,000.00 USD".to_string(),
                tables: vec![],
            },
            Page {
                text: "Attachment 2 - Price List\nUnit Rate".to_string(),
                tables: vec![table],
            },
        ],
    }
}

/// A Format B site-hours timesheet: `rows` are (date cell, site, travel,
/// weekend, saturday).
fn format_b_doc(source: &str, name: &str, rows: &[(&str, &str, &str, &str, &str)]) -> ExtractedDocument {
    let mut table: Table = vec![
        vec![
            cell("DATE"),
            cell("DAY"),
            cell("HOURS ON SITE"),
            cell("A"),
            cell("B"),
            cell("C"),
            cell("DESCRIPTION"),
            None,
        ],
        vec![
            None,
            None,
            None,
            cell("(TRAV)"),
            cell("(WKD/FRI)"),
            cell("(SAT)"),
            None,
            None,
        ],
    ];
    for (date, site, travel, weekend, saturday) in rows {
        table.push(vec![
            cell(date),
            None,
            cell(site),
            cell(travel),
            cell(weekend),
            cell(saturday),
            cell("commissioning support"),
            None,
        ]);
    }

    ExtractedDocument {
        source: source.to_string(),
        pages: vec![Page {
            text: format!("SERVICE TIME SHEET\nHOURS ON SITE\nFOR EMERSON: {name}____\n"),
            tables: vec![table],
        }],
    }
}

/// A Format A labeled time report: `rows` are (date cell, travel, regular,
/// overtime, premier OT, stated total).
fn format_a_doc(source: &str, name: &str, rows: &[(&str, &str, &str, &str, &str, &str)]) -> ExtractedDocument {
    let mut table: Table = vec![vec![
        cell("Date"),
        cell("Day"),
        cell("Site Start"),
        cell("Site End"),
        cell("Travel Time"),
        cell("Regular"),
        cell("Overtime"),
        cell("Premier OT"),
        cell("Total"),
    ]];
    for (date, travel, regular, overtime, premier, total) in rows {
        table.push(vec![
            cell(date),
            cell("Mon"),
            cell("07:00"),
            cell("17:00"),
            cell(travel),
            cell(regular),
            cell(overtime),
            cell(premier),
            cell(total),
        ]);
    }

    ExtractedDocument {
        source: source.to_string(),
        pages: vec![Page {
            text: format!(
                "SERVICE / TIME REPORT\nEMR Engineer: {name}\nCustomer Site\n\
                 Travel Time Regular Overtime Premier OT Total"
            ),
            tables: vec![table],
        }],
    }
}

fn directory() -> EngineerDirectory {
    [(
        "Ankit Modi".to_string(),
        EngineerProfile {
            category: Category::Onshore,
            level: EngineerLevel::ServiceField,
        },
    )]
    .into_iter()
    .collect()
}

/// One onshore engineer works a full week: five standing 10-hour days
/// (Sunday through Thursday), a 12-hour Friday, and a 10-hour Saturday.
/// The splitter turns the Friday into holiday hours and the Saturday into
/// overtime, giving 50 x 286 + 10 x 372 + 12 x 443 = 23336.00.
#[test]
fn test_full_week_onshore_invoice() {
    let timesheet = format_b_doc(
        "Ankit_Modi_week03.pdf",
        "Ankit Modi",
        &[
            ("SUN\n11/01/2026", "8", "2", "0", "0"),
            ("MON\n12/01/2026", "10", "0", "0", "0"),
            ("TUE\n13/01/2026", "10", "0", "0", "0"),
            ("WED\n14/01/2026", "10", "0", "0", "0"),
            ("THU\n15/01/2026", "10", "0", "0", "0"),
            ("FRI\n16/01/2026", "12", "0", "0", "0"),
            ("SAT\n17/01/2026", "10", "0", "0", "0"),
        ],
    );

    let result = generate_invoice(&contract_doc(), &[timesheet], &directory()).unwrap();

    assert_eq!(result.contract.contract_number, "1535984");
    assert_eq!(result.engineer_blocks.len(), 1);

    let block = &result.engineer_blocks[0];
    assert_eq!(block.name, "Ankit Modi");
    assert_eq!(block.total_normal_hours(), dec("50"));
    assert_eq!(block.total_overtime_hours(), dec("10"));
    assert_eq!(block.total_holiday_hours(), dec("12"));
    assert_eq!(block.normal_cost(), dec("14300.00"));
    assert_eq!(block.overtime_cost(), dec("3720.00"));
    assert_eq!(block.holiday_cost(), dec("5316.00"));
    assert_eq!(result.grand_total(), dec("23336.00"));

    assert_eq!(result.all_dates.len(), 7);
    assert_eq!(
        result.all_dates[0],
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
    );
}

/// Both timesheet layouts feed the same invoice; engineers come out in
/// name order.
#[test]
fn test_mixed_format_documents_combine() {
    let sheet_b = format_b_doc(
        "Ankit_Modi_week03.pdf",
        "Ankit Modi",
        &[("MON\n12/01/2026", "10", "0", "0", "0")],
    );
    let sheet_a = format_a_doc(
        "negi_report.pdf",
        "MR. SURAJ NEGI",
        &[("12-Jan-26", "2", "8", "0", "0", "10")],
    );

    let result = generate_invoice(&contract_doc(), &[sheet_b, sheet_a], &directory()).unwrap();

    let names: Vec<&str> = result
        .engineer_blocks
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ankit Modi", "SURAJ NEGI"]);
    // 20 normal hours at 286 between them.
    assert_eq!(result.grand_total(), dec("5720.00"));
}

/// The same engineer and date in two documents merge into one entry with
/// both sources recorded.
#[test]
fn test_cross_document_same_day_merge() {
    let morning = format_b_doc(
        "Ankit_Modi_site_a.pdf",
        "Ankit Modi",
        &[("MON\n12/01/2026", "5", "0", "0", "0")],
    );
    let evening = format_b_doc(
        "Ankit_Modi_site_b.pdf",
        "Ankit Modi",
        &[("MON\n12/01/2026", "4", "0", "0", "0")],
    );

    let result = generate_invoice(&contract_doc(), &[morning, evening], &directory()).unwrap();

    let block = &result.engineer_blocks[0];
    assert_eq!(block.entries.len(), 1);
    assert_eq!(block.entries[0].normal_hours, dec("9"));
    assert_eq!(
        block.entries[0].source,
        "Ankit_Modi_site_a.pdf; Ankit_Modi_site_b.pdf"
    );
}

/// Per-document totals can each pass while the aggregate across documents
/// breaks the 24-hour cap; validation must catch the aggregate.
#[test]
fn test_aggregated_daily_total_over_24_rejected() {
    let first = format_b_doc(
        "Ankit_Modi_a.pdf",
        "Ankit Modi",
        &[("MON\n12/01/2026", "14", "0", "0", "0")],
    );
    let second = format_b_doc(
        "Ankit_Modi_b.pdf",
        "Ankit Modi",
        &[("MON\n12/01/2026", "14", "0", "0", "0")],
    );

    let err = generate_invoice(&contract_doc(), &[first, second], &directory()).unwrap_err();
    assert!(
        err.problems()
            .iter()
            .any(|p| p.contains("aggregated daily total=28 > 24")),
        "problems: {:?}",
        err.problems()
    );
}

/// An incomplete price list fails the run before any timesheet is read.
#[test]
fn test_incomplete_contract_rates_fail_run() {
    let mut doc = contract_doc();
    // Drop offshore item 10 (principal holiday rate).
    let table = &mut doc.pages[1].tables[0];
    let offshore_start = table
        .iter()
        .position(|row| row[0].as_deref() == Some("B"))
        .unwrap();
    let item10 = table
        .iter()
        .skip(offshore_start)
        .position(|row| row[0].as_deref() == Some("10"))
        .unwrap();
    table.remove(offshore_start + item10);

    let timesheet = format_b_doc(
        "Ankit_Modi_week03.pdf",
        "Ankit Modi",
        &[("MON\n12/01/2026", "10", "0", "0", "0")],
    );

    let err = generate_invoice(&doc, &[timesheet], &directory()).unwrap_err();
    assert!(
        err.problems()
            .iter()
            .any(|p| p.contains("Offshore principal: missing rates for HOT"))
    );
}

/// 18 normal hours at 286.00 must come out as exactly 5148.00; binary
/// floating point would drift here.
#[test]
fn test_exact_decimal_cost() {
    let timesheet = format_a_doc(
        "negi_report.pdf",
        "MR. SURAJ NEGI",
        &[
            ("12-Jan-26", "2", "8", "0", "0", "10"),
            ("13-Jan-26", "0", "8", "0", "0", "8"),
        ],
    );

    let result =
        generate_invoice(&contract_doc(), &[timesheet], &EngineerDirectory::default()).unwrap();
    assert_eq!(result.grand_total(), dec("5148.00"));
}

/// The audit report re-states the invoice exactly, with decimal-string
/// amounts and the full source trail.
#[test]
fn test_audit_report_traces_invoice() {
    let timesheet = format_b_doc(
        "Ankit_Modi_week03.pdf",
        "Ankit Modi",
        &[
            ("MON\n12/01/2026", "10", "0", "0", "0"),
            ("TUE\n13/01/2026", "10", "0", "0", "0"),
        ],
    );

    let result = generate_invoice(&contract_doc(), &[timesheet], &directory()).unwrap();
    let report = AuditReport::from_result(&result);

    assert_eq!(report.contract_number, "1535984");
    assert_eq!(report.summary.total_engineers, 1);
    assert_eq!(report.summary.grand_total_usd, result.grand_total());
    assert_eq!(report.source_files, vec!["Ankit_Modi_week03.pdf"]);
    assert_eq!(report.engineers[0].entries.len(), 2);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"grand_total_usd\": \"5720.00\""));
}
