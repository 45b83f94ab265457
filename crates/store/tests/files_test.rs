//! JSON document store tests.

use std::fs;
use std::path::Path;

use planner_core::budget::BudgetStatus;
use planner_store::{JsonFileStore, StoreError};
use rstest::rstest;
use rust_decimal_macros::dec;
use tempfile::TempDir;

const BUDGET_ID: &str = "0191f0a8-2a4e-7c3b-9c1e-3f5d2b8a7e01";
const PERSON_ID: &str = "0191f0a8-2a4e-7c3b-9c1e-3f5d2b8a7e02";

fn store_in(dir: &Path) -> JsonFileStore {
    JsonFileStore::new(dir.join("budgets.json"), dir.join("personnel.json"))
}

#[test]
fn test_missing_files_are_empty_collections() {
    let dir = TempDir::new().unwrap();
    let snapshot = store_in(dir.path()).load().unwrap();
    assert!(snapshot.budgets.is_empty());
    assert!(snapshot.personnel.is_empty());
}

#[test]
fn test_blank_file_is_empty_collection() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("budgets.json"), "  \n").unwrap();
    let snapshot = store_in(dir.path()).load().unwrap();
    assert!(snapshot.budgets.is_empty());
}

#[test]
fn test_loads_lenient_records() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("budgets.json"),
        format!(
            r#"[{{
                "id": "{BUDGET_ID}",
                "name": "Warehouse",
                "totalHours": "40",
                "laborBreakdown": [{{"type": "welder", "hours": 40}}],
                "startDate": "2024-01-01",
                "endDate": "not a date",
                "status": "Accepted",
                "assignedPersonnel": ["{PERSON_ID}"],
                "client": "ACME"
            }}]"#
        ),
    )
    .unwrap();
    fs::write(
        dir.path().join("personnel.json"),
        format!(
            r#"[{{"id": "{PERSON_ID}", "name": "Ana", "laborType": "welder",
                 "hoursPerDay": 8, "daysPerWeek": "five"}}]"#
        ),
    )
    .unwrap();

    let snapshot = store_in(dir.path()).load().unwrap();

    let budget = &snapshot.budgets[0];
    assert_eq!(budget.total_hours, dec!(40));
    assert_eq!(budget.status, BudgetStatus::Accepted);
    assert!(budget.start_date.is_some());
    assert_eq!(budget.end_date, None);
    assert_eq!(budget.extra["client"], "ACME");
    assert_eq!(budget.assigned_personnel.len(), 1);

    let person = &snapshot.personnel[0];
    assert_eq!(person.hours_per_day, dec!(8));
    assert_eq!(person.days_per_week, dec!(0));
}

#[rstest]
#[case::missing_id(r#"{"name": "bad", "totalHours": 40}"#)]
#[case::non_uuid_id(r#"{"id": "budget-17", "name": "bad", "totalHours": 40}"#)]
#[case::numeric_id(r#"{"id": 17, "name": "bad", "totalHours": 40}"#)]
#[case::not_an_object(r#""bad""#)]
fn test_unreadable_document_is_skipped(#[case] bad: &str) {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("budgets.json"),
        format!(r#"[{bad}, {{"id": "{BUDGET_ID}", "name": "ok"}}]"#),
    )
    .unwrap();

    let snapshot = store_in(dir.path()).load().unwrap();

    assert_eq!(snapshot.budgets.len(), 1);
    assert_eq!(snapshot.budgets[0].name, "ok");
}

#[test]
fn test_non_array_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("personnel.json"), "{\"oops\": true}").unwrap();

    let err = store_in(dir.path()).load().unwrap_err();

    assert!(matches!(err, StoreError::Parse { .. }));
}
