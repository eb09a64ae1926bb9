//! Workbook ingestion and tidy-table export tests
//!
//! Fixtures are written with rust_xlsxwriter and read back through the real
//! calamine import path, so the whole boundary is exercised end to end.

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;
use thermo::cache::TableCache;
use thermo::excel::{TableExporter, WorkbookImporter};
use thermo::types::{DaysConfig, Metric};
use thermo::ThermoError;

/// Company data columns start at "AA" in the production layout
const START: u16 = 26;

/// Two-tab fixture: title row, sparse company names over Sales/GP pairs from
/// column AA, three day rows plus a trailing "Total" row; goals tab with an
/// extra non-105% column, a month label in F2 and an aggregate total in D10.
/// "Gamma" reports daily figures but has no goals row.
fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();

    let daily = workbook.add_worksheet();
    daily.set_name("Daily").unwrap();
    daily
        .write_string(0, 0, "October Daily Sales & Gross Profit")
        .unwrap();

    daily.write_string(1, START, "Acme").unwrap();
    daily.write_string(1, START + 2, "Beta").unwrap();
    daily.write_string(1, START + 4, "Gamma").unwrap();
    daily.write_string(2, 0, "Day").unwrap();
    for (offset, label) in ["Sales", "GP", "Sales", "GP", "Sales", "GP"].iter().enumerate() {
        daily.write_string(2, START + offset as u16, *label).unwrap();
    }

    // day, acme sales/gp, beta sales/gp, gamma sales/gp
    let rows: [(f64, [f64; 6]); 3] = [
        (1.0, [100.0, 10.0, 50.0, 5.0, 30.0, 3.0]),
        (2.0, [0.0, 0.0, 70.0, 7.0, 0.0, 0.0]),
        (3.0, [200.0, 20.0, 0.0, 0.0, 0.0, 0.0]),
    ];
    for (i, (day, values)) in rows.iter().enumerate() {
        let row = 3 + i as u32;
        daily.write_number(row, 0, *day).unwrap();
        for (offset, value) in values.iter().enumerate() {
            daily.write_number(row, START + offset as u16, *value).unwrap();
        }
    }
    daily.write_string(6, 0, "Total").unwrap();
    daily.write_number(6, START, 300.0).unwrap();

    let goals = workbook.add_worksheet();
    goals.set_name("Goals").unwrap();
    for (col, header) in ["Company", "100% Sales", "105% Sales", "105% GP"]
        .iter()
        .enumerate()
    {
        goals.write_string(0, col as u16, *header).unwrap();
    }
    goals.write_string(1, 0, "Acme").unwrap();
    goals.write_number(1, 1, 952.0).unwrap();
    goals.write_number(1, 2, 1000.0).unwrap();
    goals.write_number(1, 3, 100.0).unwrap();
    goals.write_string(2, 0, "Beta").unwrap();
    goals.write_number(2, 1, 1905.0).unwrap();
    goals.write_number(2, 2, 2000.0).unwrap();
    goals.write_number(2, 3, 250.0).unwrap();

    goals.write_string(1, 5, "October").unwrap();
    goals.write_number(9, 3, 3000.0).unwrap();

    workbook.save(path).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_resolves_companies_in_column_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let table = WorkbookImporter::new(&path).import().unwrap();
    assert_eq!(table.companies, vec!["Acme", "Beta", "Gamma"]);
}

#[test]
fn test_import_drops_total_row_and_zero_pairs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let table = WorkbookImporter::new(&path).import().unwrap();

    // No record carries the Total row's day, and no record is all-zero
    assert!(table.records.iter().all(|r| r.day <= 3));
    assert!(table
        .records
        .iter()
        .all(|r| r.sales != 0.0 || r.gross_profit != 0.0));

    // Acme day 2 was a zero pair, so only days 1 and 3 survive
    let acme_days: Vec<u32> = table.company_records("Acme").iter().map(|r| r.day).collect();
    assert_eq!(acme_days, vec![1, 3]);
}

#[test]
fn test_import_acme_series_totals() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let table = WorkbookImporter::new(&path).import().unwrap();

    let sales: f64 = table.company_series("Acme", Metric::Sales).iter().sum();
    let gp: f64 = table
        .company_series("Acme", Metric::GrossProfit)
        .iter()
        .sum();
    assert_eq!(sales, 300.0);
    assert_eq!(gp, 30.0);
}

#[test]
fn test_import_joins_105_percent_goals() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let table = WorkbookImporter::new(&path).import().unwrap();

    // The 105% columns are the canonical goals, not the 100% column
    assert_eq!(table.company_goal("Acme", Metric::Sales), 1000.0);
    assert_eq!(table.company_goal("Acme", Metric::GrossProfit), 100.0);
    assert_eq!(table.company_goal("Beta", Metric::Sales), 2000.0);
}

#[test]
fn test_import_unmatched_company_degrades_to_zero_goals() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let table = WorkbookImporter::new(&path).import().unwrap();

    let gamma = table.company_records("Gamma");
    assert!(!gamma.is_empty());
    assert!(gamma.iter().all(|r| r.sales_goal == 0.0 && r.gp_goal == 0.0));
}

#[test]
fn test_import_reads_month_label_and_total_goal_cells() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let table = WorkbookImporter::new(&path).import().unwrap();
    assert_eq!(table.month_label.as_deref(), Some("October"));
    assert_eq!(table.total_sales_goal, 3000.0);
}

#[test]
fn test_import_is_deterministic_over_identical_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let bytes = std::fs::read(&path).unwrap();
    let first = WorkbookImporter::from_bytes(bytes.clone()).import().unwrap();
    let second = WorkbookImporter::from_bytes(bytes.clone()).import().unwrap();

    assert_eq!(first, second);
    assert_eq!(TableCache::digest(&bytes), TableCache::digest(&bytes));
}

#[test]
fn test_import_from_bytes_matches_import_from_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("october.xlsx");
    write_fixture(&path);

    let from_path = WorkbookImporter::new(&path).import().unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let from_bytes = WorkbookImporter::from_bytes(bytes).import().unwrap();

    assert_eq!(from_path, from_bytes);
}

#[test]
fn test_import_missing_goals_tab_is_a_workbook_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("single.xlsx");

    let mut workbook = Workbook::new();
    let daily = workbook.add_worksheet();
    daily.write_string(0, 0, "Only one tab").unwrap();
    workbook.save(&path).unwrap();

    let result = WorkbookImporter::new(&path).import();
    assert!(matches!(result, Err(ThermoError::Workbook(_))));
}

#[test]
fn test_import_unreadable_file_is_a_workbook_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();

    let result = WorkbookImporter::new(&path).import();
    assert!(matches!(result, Err(ThermoError::Workbook(_))));
}

#[test]
fn test_import_all_rows_skipped_is_no_data() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.xlsx");

    let mut workbook = Workbook::new();
    let daily = workbook.add_worksheet();
    daily.write_string(0, 0, "Title").unwrap();
    daily.write_string(1, START, "Acme").unwrap();
    daily.write_string(2, START, "Sales").unwrap();
    daily.write_string(2, START + 1, "GP").unwrap();
    // Only a Total row below the headers: nothing reshapeable
    daily.write_string(3, 0, "Total").unwrap();
    daily.write_number(3, START, 500.0).unwrap();

    let goals = workbook.add_worksheet();
    goals.write_string(0, 0, "Company").unwrap();
    workbook.save(&path).unwrap();

    let result = WorkbookImporter::new(&path).import();
    assert!(matches!(result, Err(ThermoError::NoData)));
}

#[test]
fn test_import_with_custom_start_column() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("narrow.xlsx");

    // Same layout but with company blocks starting right after the Day column
    let mut workbook = Workbook::new();
    let daily = workbook.add_worksheet();
    daily.write_string(0, 0, "Title").unwrap();
    daily.write_string(1, 1, "Acme").unwrap();
    daily.write_string(2, 1, "Sales").unwrap();
    daily.write_string(2, 2, "GP").unwrap();
    daily.write_number(3, 0, 1.0).unwrap();
    daily.write_number(3, 1, 100.0).unwrap();
    daily.write_number(3, 2, 10.0).unwrap();

    let goals = workbook.add_worksheet();
    goals.write_string(0, 0, "Company").unwrap();
    goals.write_string(1, 0, "Acme").unwrap();
    workbook.save(&path).unwrap();

    let table = WorkbookImporter::new(&path)
        .with_start_col(1)
        .import()
        .unwrap();
    assert_eq!(table.companies, vec!["Acme"]);
    assert_eq!(table.records.len(), 1);
    assert_eq!(table.records[0].sales, 100.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_xlsx_writes_daily_and_pacing_sheets() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("october.xlsx");
    let output = temp_dir.path().join("tidy.xlsx");
    write_fixture(&input);

    let table = WorkbookImporter::new(&input).import().unwrap();
    let days = DaysConfig::default();
    TableExporter::new(&table, &days).export(&output).unwrap();
    assert!(output.exists());

    // Read the export back: one header row plus one row per record
    let mut reread = calamine::open_workbook_auto(&output).unwrap();
    let daily = calamine::Reader::worksheet_range_at(&mut reread, 0)
        .unwrap()
        .unwrap();
    assert_eq!(daily.rows().count(), table.records.len() + 1);

    let pacing = calamine::Reader::worksheet_range_at(&mut reread, 1)
        .unwrap()
        .unwrap();
    // Two pacing rows (Sales + GP) per company
    assert_eq!(pacing.rows().count(), table.companies.len() * 2 + 1);
}

#[test]
fn test_export_json_round_trips_records_and_pacing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("october.xlsx");
    let output = temp_dir.path().join("tidy.json");
    write_fixture(&input);

    let table = WorkbookImporter::new(&input).import().unwrap();
    let days = DaysConfig::default();
    TableExporter::new(&table, &days).export(&output).unwrap();

    let body = std::fs::read_to_string(&output).unwrap();
    let payload: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(
        payload["records"].as_array().unwrap().len(),
        table.records.len()
    );
    assert_eq!(payload["month_label"], "October");
    assert_eq!(
        payload["pacing"].as_array().unwrap().len(),
        table.companies.len()
    );
    assert!(payload["generated_at"].is_string());
}

#[test]
fn test_export_rejects_unknown_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("october.xlsx");
    let output = temp_dir.path().join("tidy.csv");
    write_fixture(&input);

    let table = WorkbookImporter::new(&input).import().unwrap();
    let days = DaysConfig::default();
    let result = TableExporter::new(&table, &days).export(&output);
    assert!(matches!(result, Err(ThermoError::Validation(_))));
}
