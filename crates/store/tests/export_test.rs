//! CSV export to disk.

use std::fs;

use planner_core::budget::{Budget, BudgetService, CategoryFilter};
use planner_store::{CSV_HEADER, StoreError, export_budgets_csv};
use tempfile::TempDir;

#[test]
fn test_exports_filtered_selection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let budgets = vec![
        Budget::new("Roof").with_category("Civil"),
        Budget::new("Panel").with_category("Electrical"),
    ];
    let filter = CategoryFilter::Category("Civil".to_string());

    let rows = export_budgets_csv(
        &path,
        BudgetService::filter_by_category(&budgets, &filter),
        &[],
    )
    .unwrap();

    assert_eq!(rows, 1);
    let written = fs::read_to_string(&path).unwrap();
    let mut reader = csv::Reader::from_reader(written.as_bytes());
    assert_eq!(reader.headers().unwrap(), CSV_HEADER.as_slice());
    let records: Vec<_> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "Roof");
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.csv");

    let err = export_budgets_csv(&path, &[Budget::new("Roof")], &[]).unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!path.exists());
}
