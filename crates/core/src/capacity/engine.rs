//! Aggregation engine combining budgets and personnel into capacity views.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use planner_shared::types::PersonId;
use rust_decimal::Decimal;
use tracing::debug;

use super::distribution::{HourDistribution, monthly_capacity_for_person};
use super::types::{
    AllocationStatus, CapacityReport, CapacityRow, OccupationRow, OccupationSeries, WorkloadRow,
};
use crate::budget::{Budget, BudgetStatus, Person, Snapshot};
use crate::calendar::MonthKey;

/// Hours keyed by labor type, remembering first-seen key order.
#[derive(Default)]
struct RoleHours {
    order: Vec<String>,
    hours: HashMap<String, Decimal>,
}

impl RoleHours {
    fn add(&mut self, role: &str, hours: Decimal) {
        if let Some(total) = self.hours.get_mut(role) {
            *total = total.saturating_add(hours);
        } else {
            self.order.push(role.to_string());
            self.hours.insert(role.to_string(), hours);
        }
    }

    fn get(&self, role: &str) -> Decimal {
        self.hours.get(role).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Engine computing capacity views from a snapshot.
pub struct CapacityEngine;

impl CapacityEngine {
    /// Required vs available hours per labor type.
    ///
    /// Required hours come from accepted budgets with both dates set. Each
    /// role's total is averaged over the distinct months the role is active
    /// in; available hours are the summed monthly capacity of everyone of
    /// that type. Rows list required-side roles first, then roles that only
    /// have availability.
    #[must_use]
    pub fn calculate_capacity(budgets: &[Budget], personnel: &[Person]) -> Vec<CapacityRow> {
        let mut required = RoleHours::default();
        let mut months_by_role: HashMap<String, BTreeSet<MonthKey>> = HashMap::new();

        for budget in budgets
            .iter()
            .filter(|b| b.status == BudgetStatus::Accepted && b.has_dates())
        {
            for item in &budget.labor_breakdown {
                let spread = HourDistribution::between(budget.start_date, budget.end_date, item.hours);
                for (month, hours) in spread {
                    required.add(&item.labor_type, hours);
                    months_by_role
                        .entry(item.labor_type.clone())
                        .or_default()
                        .insert(month);
                }
            }
        }

        let mut available = RoleHours::default();
        for person in personnel {
            available.add(
                &person.labor_type,
                monthly_capacity_for_person(person.hours_per_day, person.days_per_week),
            );
        }

        let mut roles = required.order.clone();
        for role in &available.order {
            if !required.hours.contains_key(role) {
                roles.push(role.clone());
            }
        }

        roles
            .into_iter()
            .map(|role| {
                let month_count = months_by_role.get(&role).map_or(0, BTreeSet::len);
                let required_avg = if month_count > 0 {
                    required.get(&role) / Decimal::from(month_count)
                } else {
                    Decimal::ZERO
                };
                let avail = available.get(&role);
                Self::capacity_row(role, required_avg, avail)
            })
            .collect()
    }

    fn capacity_row(labor_type: String, required: Decimal, available: Decimal) -> CapacityRow {
        let deficit = required.saturating_sub(available).max(Decimal::ZERO);
        let surplus = available.saturating_sub(required).max(Decimal::ZERO);
        let utilization = if available > Decimal::ZERO {
            required
                .checked_div(available)
                .map_or(Decimal::MAX, |share| share.saturating_mul(Decimal::ONE_HUNDRED))
        } else {
            Decimal::ZERO
        };

        let deficit = HourDistribution::round_hours(deficit);
        let surplus = HourDistribution::round_hours(surplus);
        let status = if deficit > Decimal::ZERO {
            AllocationStatus::OverAllocated
        } else if surplus > Decimal::ZERO {
            AllocationStatus::UnderAllocated
        } else {
            AllocationStatus::Balanced
        };

        CapacityRow {
            labor_type,
            required: HourDistribution::round_hours(required),
            available: HourDistribution::round_hours(available),
            deficit,
            surplus,
            utilization: HourDistribution::round_percent(utilization),
            status,
        }
    }

    /// Assigned vs available monthly hours per person.
    ///
    /// For each budget with both dates, every assigned person receives the
    /// first breakdown entry of their labor type divided by the budget's
    /// month count. Co-assigned people of the same type each receive the
    /// full share; it is not split between them. Unknown person IDs are
    /// skipped.
    #[must_use]
    pub fn calculate_workload_per_person(
        budgets: &[Budget],
        personnel: &[Person],
    ) -> Vec<WorkloadRow> {
        let mut rows: Vec<WorkloadRow> = Vec::with_capacity(personnel.len());
        let mut index: HashMap<PersonId, usize> = HashMap::new();
        let mut assigned: Vec<Decimal> = Vec::with_capacity(personnel.len());
        let mut available: Vec<Decimal> = Vec::with_capacity(personnel.len());

        for person in personnel {
            let row = WorkloadRow {
                person_id: person.id,
                name: person.name.clone(),
                labor_type: person.labor_type.clone(),
                assigned_hours: Decimal::ZERO,
                available_hours: Decimal::ZERO,
            };
            let capacity = monthly_capacity_for_person(person.hours_per_day, person.days_per_week);
            if let Some(&i) = index.get(&person.id) {
                rows[i] = row;
                assigned[i] = Decimal::ZERO;
                available[i] = capacity;
            } else {
                index.insert(person.id, rows.len());
                rows.push(row);
                assigned.push(Decimal::ZERO);
                available.push(capacity);
            }
        }

        for budget in budgets {
            let (Some(start), Some(end)) = (budget.start_date, budget.end_date) else {
                continue;
            };
            for person_id in &budget.assigned_personnel {
                let Some(&i) = index.get(person_id) else {
                    debug!(budget_id = %budget.id, person_id = %person_id, "Skipping unknown person");
                    continue;
                };
                let Some(item) = budget.labor_item(&rows[i].labor_type) else {
                    continue;
                };
                assigned[i] = assigned[i]
                    .saturating_add(HourDistribution::per_month_share(start, end, item.hours));
            }
        }

        rows.into_iter()
            .zip(assigned.into_iter().zip(available))
            .map(|(mut row, (assigned, available))| {
                row.assigned_hours = HourDistribution::round_hours(assigned);
                row.available_hours = HourDistribution::round_hours(available);
                row
            })
            .collect()
    }

    /// Hours per month each person is occupied, for charting.
    ///
    /// Sums the monthly distribution of the first matching breakdown entry of
    /// every budget the person is assigned to. People with no occupied month
    /// are left out.
    #[must_use]
    pub fn monthly_occupation(budgets: &[Budget], personnel: &[Person]) -> OccupationSeries {
        let rows: Vec<OccupationRow> = personnel
            .iter()
            .filter_map(|person| {
                let mut months: BTreeMap<MonthKey, Decimal> = BTreeMap::new();
                for budget in budgets.iter().filter(|b| b.is_assigned(person.id)) {
                    let Some(item) = budget.labor_item(&person.labor_type) else {
                        continue;
                    };
                    let spread =
                        HourDistribution::between(budget.start_date, budget.end_date, item.hours);
                    for (month, hours) in spread {
                        let total = months.entry(month).or_default();
                        *total = total.saturating_add(hours);
                    }
                }
                (!months.is_empty()).then(|| OccupationRow {
                    person_id: person.id,
                    name: person.name.clone(),
                    months,
                })
            })
            .collect();

        let months: BTreeSet<MonthKey> = rows.iter().flat_map(|r| r.months.keys().copied()).collect();

        OccupationSeries {
            rows,
            months: months.into_iter().collect(),
        }
    }

    /// Every view of `snapshot` in one call.
    #[must_use]
    pub fn analyze(snapshot: &Snapshot) -> CapacityReport {
        CapacityReport {
            capacity: Self::calculate_capacity(&snapshot.budgets, &snapshot.personnel),
            workload: Self::calculate_workload_per_person(&snapshot.budgets, &snapshot.personnel),
            occupation: Self::monthly_occupation(&snapshot.budgets, &snapshot.personnel),
        }
    }
}
