//! Finish-date projector.
//!
//! Projection works in weekly units: each assigned person contributes
//! `hours_per_day * days_per_week` to their role, and the budget finishes
//! when the slowest role has worked off its hours. This is deliberately a
//! different unit from the 4.33-weeks monthly capacity model.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use planner_shared::types::PersonId;
use rust_decimal::prelude::*;
use tracing::debug;

use super::types::{FinishProjection, WeekSlot};
use crate::budget::{Budget, LaborItem, Person};
use crate::capacity::weekly_capacity_for_person;

/// Projector for budget completion dates.
pub struct FinishProjector;

impl FinishProjector {
    /// Projects when `budget` completes with its assigned staff.
    ///
    /// Returns `None` when the budget has no start date, no breakdown, or
    /// nobody assigned, and when the week count or end date is out of range. Returns [`FinishProjection::Infeasible`] for the
    /// first breakdown role with hours but no weekly capacity.
    #[must_use]
    pub fn project(budget: &Budget, personnel: &[Person]) -> Option<FinishProjection> {
        Self::project_parts(
            budget.start_date,
            &budget.labor_breakdown,
            &budget.assigned_personnel,
            personnel,
        )
    }

    /// Projects a budget still being edited.
    ///
    /// Breakdown entries without a type or with zero hours are dropped
    /// before projecting.
    #[must_use]
    pub fn project_draft(budget: &Budget, personnel: &[Person]) -> Option<FinishProjection> {
        let cleaned: Vec<LaborItem> = budget
            .labor_breakdown
            .iter()
            .filter(|item| !item.labor_type.is_empty() && !item.hours.is_zero())
            .cloned()
            .collect();
        Self::project_parts(
            budget.start_date,
            &cleaned,
            &budget.assigned_personnel,
            personnel,
        )
    }

    fn project_parts(
        start: Option<NaiveDate>,
        breakdown: &[LaborItem],
        assigned: &[PersonId],
        personnel: &[Person],
    ) -> Option<FinishProjection> {
        let start = start?;
        if breakdown.is_empty() || assigned.is_empty() {
            return None;
        }

        let mut weekly_by_role: HashMap<&str, Decimal> = HashMap::new();
        for person_id in assigned {
            let Some(person) = personnel.iter().find(|p| p.id == *person_id) else {
                debug!(person_id = %person_id, "Skipping unknown person");
                continue;
            };
            let weekly = weekly_by_role.entry(person.labor_type.as_str()).or_default();
            *weekly = weekly.saturating_add(weekly_capacity_for_person(
                person.hours_per_day,
                person.days_per_week,
            ));
        }

        let mut max_weeks: u32 = 0;
        for item in breakdown {
            let weekly = weekly_by_role
                .get(item.labor_type.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            if item.hours > Decimal::ZERO && weekly.is_zero() {
                return Some(FinishProjection::Infeasible {
                    missing_role: item.labor_type.clone(),
                });
            }
            let weeks = if weekly > Decimal::ZERO {
                item.hours.checked_div(weekly)?.ceil().max(Decimal::ZERO)
            } else {
                Decimal::ZERO
            };
            max_weeks = max_weeks.max(weeks.to_u32()?);
        }

        let end_date = start.checked_add_days(Days::new(u64::from(max_weeks) * 7))?;
        Some(FinishProjection::Feasible {
            end_date,
            weeks: max_weeks,
        })
    }

    /// Books `total_hours` week by week at `hours_per_week`.
    ///
    /// Weeks start on the first Monday on or after `start`; each week takes
    /// `min(hours_per_week, remaining)`. Empty for a non-positive rate or
    /// total.
    #[must_use]
    pub fn weekly_schedule(
        start: NaiveDate,
        total_hours: Decimal,
        hours_per_week: Decimal,
    ) -> Vec<WeekSlot> {
        if hours_per_week <= Decimal::ZERO || total_hours <= Decimal::ZERO {
            return Vec::new();
        }

        let to_monday = (7 - start.weekday().num_days_from_monday()) % 7;
        let Some(mut week_start) = start.checked_add_days(Days::new(u64::from(to_monday))) else {
            return Vec::new();
        };

        let mut slots = Vec::new();
        let mut remaining = total_hours;
        while remaining > Decimal::ZERO {
            let hours = hours_per_week.min(remaining);
            slots.push(WeekSlot { week_start, hours });
            remaining -= hours;
            match week_start.checked_add_days(Days::new(7)) {
                Some(next) => week_start = next,
                None => break,
            }
        }
        slots
    }
}
