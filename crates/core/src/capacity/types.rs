//! Derived capacity views.
//!
//! Every value here is recomputed from a snapshot and never persisted.

use std::collections::BTreeMap;

use planner_shared::types::PersonId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::distribution::HourDistribution;
use crate::calendar::MonthKey;

/// Over/under-allocation flag for a labor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Required hours exceed available hours.
    OverAllocated,
    /// Available hours exceed required hours.
    UnderAllocated,
    /// Required and available round to the same figure.
    Balanced,
}

/// Required vs available monthly hours for one labor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRow {
    /// Labor type key.
    pub labor_type: String,
    /// Average required hours per active month (whole hours).
    pub required: Decimal,
    /// Available hours per month (whole hours).
    pub available: Decimal,
    /// Shortfall per month (whole hours).
    pub deficit: Decimal,
    /// Spare hours per month (whole hours).
    pub surplus: Decimal,
    /// Required as a percentage of available, two decimals.
    pub utilization: Decimal,
    /// Allocation flag derived from deficit and surplus.
    pub status: AllocationStatus,
}

/// Monthly load of one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRow {
    /// Person ID.
    pub person_id: PersonId,
    /// Display name.
    pub name: String,
    /// Labor type key.
    pub labor_type: String,
    /// Assigned hours per month (whole hours).
    pub assigned_hours: Decimal,
    /// Available hours per month (whole hours).
    pub available_hours: Decimal,
}

impl WorkloadRow {
    /// Hours per month above availability.
    #[must_use]
    pub fn overload(&self) -> Decimal {
        self.assigned_hours
            .saturating_sub(self.available_hours)
            .max(Decimal::ZERO)
    }

    /// Hours per month still free.
    #[must_use]
    pub fn free(&self) -> Decimal {
        self.available_hours
            .saturating_sub(self.assigned_hours)
            .max(Decimal::ZERO)
    }

    /// Assigned share of availability, capped at 100; zero without availability.
    #[must_use]
    pub fn load_percent(&self) -> Decimal {
        if self.available_hours > Decimal::ZERO {
            self.assigned_hours
                .checked_div(self.available_hours)
                .map_or(Decimal::ONE_HUNDRED, |share| {
                    share.saturating_mul(Decimal::ONE_HUNDRED)
                })
                .min(Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        }
    }

    /// Whether the person is assigned more than they can cover.
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        self.overload() > Decimal::ZERO
    }
}

/// Hours per month one person is occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationRow {
    /// Person ID.
    pub person_id: PersonId,
    /// Display name.
    pub name: String,
    /// Unrounded hours per month.
    pub months: BTreeMap<MonthKey, Decimal>,
}

impl OccupationRow {
    /// Months in order with whole-hour values.
    #[must_use]
    pub fn rounded_months(&self) -> Vec<(MonthKey, Decimal)> {
        self.months
            .iter()
            .map(|(month, hours)| (*month, HourDistribution::round_hours(*hours)))
            .collect()
    }
}

/// Monthly occupation of every occupied person, for charting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationSeries {
    /// One row per person with at least one occupied month.
    pub rows: Vec<OccupationRow>,
    /// Sorted union of every month across rows.
    pub months: Vec<MonthKey>,
}

/// All derived views of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Required vs available by labor type.
    pub capacity: Vec<CapacityRow>,
    /// Per-person monthly workload.
    pub workload: Vec<WorkloadRow>,
    /// Per-person monthly occupation.
    pub occupation: OccupationSeries,
}
