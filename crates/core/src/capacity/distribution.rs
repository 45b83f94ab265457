//! Hour distribution and per-person capacity.
//!
//! Hours are spread evenly over the calendar months a date range touches.
//! Distribution keeps full decimal precision; rounding belongs to the
//! output boundary and is provided here as [`HourDistribution::round_hours`]
//! and [`HourDistribution::round_percent`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use tracing::warn;

use crate::calendar::{MonthKey, months_between};

/// Mean weeks per month used by the monthly capacity model.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Spreads `total_hours` evenly over every month from `start` to `end`.
///
/// Returns an empty mapping when the range yields no months; those hours
/// are excluded from monthly distribution entirely.
#[must_use]
pub fn distribute_hours_per_month(
    start: NaiveDate,
    end: NaiveDate,
    total_hours: Decimal,
) -> BTreeMap<MonthKey, Decimal> {
    let months = months_between(start, end);
    if months.is_empty() {
        return BTreeMap::new();
    }
    let per_month = total_hours / Decimal::from(months.len());
    months.into_iter().map(|m| (m, per_month)).collect()
}

/// Nominal hours per month: `hours_per_day * days_per_week * 4.33`.
///
/// Saturates at the Decimal range instead of overflowing.
#[must_use]
pub fn monthly_capacity_for_person(hours_per_day: Decimal, days_per_week: Decimal) -> Decimal {
    weekly_capacity_for_person(hours_per_day, days_per_week).saturating_mul(WEEKS_PER_MONTH)
}

/// Nominal hours per week: `hours_per_day * days_per_week`.
///
/// Saturates at the Decimal range instead of overflowing.
#[must_use]
pub fn weekly_capacity_for_person(hours_per_day: Decimal, days_per_week: Decimal) -> Decimal {
    hours_per_day.checked_mul(days_per_week).unwrap_or_else(|| {
        warn!(%hours_per_day, %days_per_week, "Capacity out of range, saturating");
        hours_per_day.saturating_mul(days_per_week)
    })
}

/// Distribution helpers for record-level inputs and output rounding.
pub struct HourDistribution;

impl HourDistribution {
    /// Distributes hours over an optional date range.
    ///
    /// Empty unless both dates are present.
    #[must_use]
    pub fn between(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        total_hours: Decimal,
    ) -> BTreeMap<MonthKey, Decimal> {
        match (start, end) {
            (Some(start), Some(end)) => distribute_hours_per_month(start, end, total_hours),
            _ => BTreeMap::new(),
        }
    }

    /// Hours per month from a plain month count, zero when the range has no
    /// months.
    #[must_use]
    pub fn per_month_share(start: NaiveDate, end: NaiveDate, hours: Decimal) -> Decimal {
        let count = months_between(start, end).len();
        if count == 0 {
            Decimal::ZERO
        } else {
            hours / Decimal::from(count)
        }
    }

    /// Rounds to whole hours, midpoints upward.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use planner_core::capacity::HourDistribution;
    ///
    /// assert_eq!(HourDistribution::round_hours(dec!(173.2)), dec!(173));
    /// assert_eq!(HourDistribution::round_hours(dec!(2.5)), dec!(3));
    /// assert_eq!(HourDistribution::round_hours(dec!(-2.5)), dec!(-2));
    /// ```
    #[must_use]
    pub fn round_hours(value: Decimal) -> Decimal {
        value.saturating_add(Decimal::new(5, 1)).floor()
    }

    /// Rounds a percentage to two decimal places, midpoints away from zero.
    #[must_use]
    pub fn round_percent(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
