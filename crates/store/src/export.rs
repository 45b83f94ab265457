//! CSV export of raw budget records.
//!
//! Exports records as stored, not engine output. Columns are fixed; every
//! field is quoted.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use planner_core::budget::{Budget, Person};
use tracing::info;

use crate::error::StoreError;

/// Column headers, in export order.
pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "Category",
    "Status",
    "Start",
    "End",
    "Total Hours",
    "Assigned Personnel",
];

/// Writes `budgets` as CSV and returns the number of data rows.
///
/// Assigned personnel are listed in roster order as `Name (LaborType)`,
/// joined with `"; "`; ids not on the roster are left out.
pub fn write_budgets_csv<'a, W, I>(
    writer: W,
    budgets: I,
    personnel: &[Person],
) -> Result<usize, StoreError>
where
    W: Write,
    I: IntoIterator<Item = &'a Budget>,
{
    let budgets: Vec<&Budget> = budgets.into_iter().collect();
    if budgets.is_empty() {
        return Err(StoreError::NothingToExport);
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for budget in &budgets {
        wtr.write_record(budget_row(budget, personnel))?;
    }
    wtr.flush().map_err(csv::Error::from)?;

    Ok(budgets.len())
}

/// Writes `budgets` to a CSV file at `path`.
pub fn export_budgets_csv<'a, I>(
    path: &Path,
    budgets: I,
    personnel: &[Person],
) -> Result<usize, StoreError>
where
    I: IntoIterator<Item = &'a Budget>,
{
    let file = File::create(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_budgets_csv(file, budgets, personnel)?;
    info!(path = %path.display(), rows, "Budgets exported");
    Ok(rows)
}

fn budget_row(budget: &Budget, personnel: &[Person]) -> [String; 7] {
    let assigned = personnel
        .iter()
        .filter(|p| budget.is_assigned(p.id))
        .map(|p| format!("{} ({})", p.name, p.labor_type))
        .collect::<Vec<_>>()
        .join("; ");

    [
        budget.name.clone(),
        budget.category.clone(),
        budget.status.to_string(),
        format_date(budget.start_date),
        format_date(budget.end_date),
        budget.total_hours.normalize().to_string(),
        assigned,
    ]
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
