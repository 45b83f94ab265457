use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use planner_core::budget::{Budget, BudgetService, CategoryFilter, LaborTotal, PersonAssignment};
use planner_core::capacity::{
    AllocationStatus, CapacityCache, CapacityEngine, CapacityRow, HourDistribution,
    OccupationRow, WorkloadRow,
};
use planner_core::projection::{FinishProjection, FinishProjector};
use planner_shared::types::{BudgetId, PersonId};
use planner_shared::{AppConfig, AppError, AppResult};
use planner_store::{JsonFileStore, SnapshotWatcher, export_budgets_csv};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::cli::{Cli, Commands, ReportCommand};
use crate::output::{print_one, print_out};

#[derive(Serialize)]
struct WorkloadLine<'a> {
    #[serde(flatten)]
    row: &'a WorkloadRow,
    overload: Decimal,
    free: Decimal,
    load_percent: Decimal,
}

impl<'a> From<&'a WorkloadRow> for WorkloadLine<'a> {
    fn from(row: &'a WorkloadRow) -> Self {
        Self {
            row,
            overload: row.overload(),
            free: row.free(),
            load_percent: HourDistribution::round_percent(row.load_percent()),
        }
    }
}

#[derive(Serialize)]
struct ExportSummary {
    path: PathBuf,
    rows: usize,
}

pub async fn run(cli: &Cli, config: &AppConfig) -> AppResult<()> {
    let store = JsonFileStore::from_config(&config.data);
    match &cli.command {
        Commands::Report(command) => report(cli, command, config, &store),
        Commands::Watch => watch(cli.json, store, config).await,
    }
}

fn report(
    cli: &Cli,
    command: &ReportCommand,
    config: &AppConfig,
    store: &JsonFileStore,
) -> AppResult<()> {
    let snapshot = store.load()?;
    let filter = CategoryFilter::from(cli.category.clone());
    let listed: Vec<Budget> = BudgetService::filter_by_category(&snapshot.budgets, &filter)
        .into_iter()
        .cloned()
        .collect();

    match command {
        ReportCommand::Capacity => {
            let rows = CapacityEngine::calculate_capacity(&snapshot.budgets, &snapshot.personnel);
            print_out(cli.json, &rows, capacity_line)
        }
        ReportCommand::Workload => {
            let rows = CapacityEngine::calculate_workload_per_person(
                &snapshot.budgets,
                &snapshot.personnel,
            );
            let lines: Vec<WorkloadLine<'_>> = rows.iter().map(WorkloadLine::from).collect();
            print_out(cli.json, &lines, workload_line)
        }
        ReportCommand::Occupation => {
            let series =
                CapacityEngine::monthly_occupation(&snapshot.budgets, &snapshot.personnel);
            if cli.json {
                print_one(true, &series, |_| String::new())
            } else {
                print_out(false, &series.rows, occupation_line)
            }
        }
        ReportCommand::Project { budget_id } => {
            let id = BudgetId::from_str(budget_id)
                .map_err(|_| AppError::Validation(format!("Invalid budget id: {budget_id}")))?;
            let budget = snapshot
                .budget(id)
                .ok_or_else(|| AppError::NotFound(format!("Budget {id}")))?;
            let projection = FinishProjector::project(budget, &snapshot.personnel);
            print_one(cli.json, &projection, projection_line)
        }
        ReportCommand::Assignments { person_id } => {
            let id = PersonId::from_str(person_id)
                .map_err(|_| AppError::Validation(format!("Invalid person id: {person_id}")))?;
            let person = snapshot
                .person(id)
                .ok_or_else(|| AppError::NotFound(format!("Person {id}")))?;
            let rows = BudgetService::assignments_for_person(person, &listed);
            print_out(cli.json, &rows, assignment_line)
        }
        ReportCommand::Budgets => print_out(cli.json, &listed, budget_line),
        ReportCommand::HoursByType => {
            let totals = BudgetService::total_hours_by_type(&listed);
            print_out(cli.json, &totals, labor_total_line)
        }
        ReportCommand::Categories => {
            let categories = BudgetService::categories(&snapshot.budgets);
            print_out(cli.json, &categories, Clone::clone)
        }
        ReportCommand::Export { out } => {
            let path = out.clone().unwrap_or_else(|| config.export.csv_path.clone());
            let rows = export_budgets_csv(&path, &listed, &snapshot.personnel)?;
            print_one(cli.json, &ExportSummary { path, rows }, |s| {
                format!("Exported {} budgets to {}", s.rows, s.path.display())
            })
        }
    }
}

async fn watch(json: bool, store: JsonFileStore, config: &AppConfig) -> AppResult<()> {
    let watcher = SnapshotWatcher::new(store)?;
    let cache = CapacityCache::from_config(&config.cache);
    let mut rx = watcher.subscribe();
    let interval = Duration::from_millis(config.watch.poll_interval_ms);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(watcher.run(interval, async {
        let _ = stop_rx.await;
    }));
    info!(interval_ms = config.watch.poll_interval_ms, "Watching data files");

    let snapshot = rx.borrow_and_update().clone();
    print_out(json, &cache.report(&snapshot).capacity, capacity_line)?;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    warn!(error = %err, "Failed to listen for Ctrl-C");
                }
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                print_out(json, &cache.report(&snapshot).capacity, capacity_line)?;
            }
        }
    }

    let _ = stop_tx.send(());
    task.await.map_err(|e| AppError::Internal(e.to_string()))?;
    info!("Stopped watching");
    Ok(())
}

const fn status_label(status: AllocationStatus) -> &'static str {
    match status {
        AllocationStatus::OverAllocated => "over-allocated",
        AllocationStatus::UnderAllocated => "under-allocated",
        AllocationStatus::Balanced => "balanced",
    }
}

fn capacity_line(row: &CapacityRow) -> String {
    format!(
        "{:<16} required {:>6}  available {:>6}  deficit {:>6}  surplus {:>6}  utilization {:>7}%  {}",
        row.labor_type,
        row.required,
        row.available,
        row.deficit,
        row.surplus,
        row.utilization,
        status_label(row.status),
    )
}

fn workload_line(line: &WorkloadLine<'_>) -> String {
    let row = line.row;
    let flag = if row.is_overloaded() {
        format!("  OVERLOADED +{}", line.overload)
    } else {
        String::new()
    };
    format!(
        "{:<20} {:<12} {:>6} / {:>6} h  {:>6}%{flag}",
        row.name, row.labor_type, row.assigned_hours, row.available_hours, line.load_percent,
    )
}

fn occupation_line(row: &OccupationRow) -> String {
    let months = row
        .rounded_months()
        .iter()
        .map(|(month, hours)| format!("{month} {hours}h"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}: {months}", row.name)
}

fn projection_line(projection: &Option<FinishProjection>) -> String {
    match projection {
        None => "No projection: needs a start date, a labor breakdown, and assigned personnel"
            .to_string(),
        Some(FinishProjection::Infeasible { missing_role }) => {
            format!("Infeasible: no assigned capacity for {missing_role}")
        }
        Some(FinishProjection::Feasible { end_date, weeks }) => {
            format!("Finishes {end_date} ({weeks} weeks)")
        }
    }
}

fn assignment_line(row: &PersonAssignment) -> String {
    format!("{}  {}  {}h", row.budget_id, row.name, row.hours.normalize())
}

fn budget_line(budget: &Budget) -> String {
    let category = if budget.category.is_empty() {
        "-"
    } else {
        budget.category.as_str()
    };
    format!(
        "{}  {:<24} {:<14} {:<10} {}h",
        budget.id,
        budget.name,
        category,
        budget.status,
        budget.total_hours.normalize(),
    )
}

fn labor_total_line(total: &LaborTotal) -> String {
    format!("{:<16} {}h", total.labor_type, total.hours.normalize())
}
