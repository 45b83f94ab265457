//! Projection result types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of projecting a budget's completion.
///
/// Infeasibility is a normal result, not an error: callers branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FinishProjection {
    /// A required role has no weekly capacity among the assigned staff.
    Infeasible {
        /// The first breakdown role without capacity.
        missing_role: String,
    },
    /// Work completes once the slowest role finishes.
    Feasible {
        /// Start date plus `weeks` whole weeks.
        end_date: NaiveDate,
        /// Weeks needed by the slowest role.
        weeks: u32,
    },
}

impl FinishProjection {
    /// Whether the budget can be completed with its assigned staff.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible { .. })
    }
}

/// Hours booked in one week of an occupation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSlot {
    /// Monday the week starts on.
    pub week_start: NaiveDate,
    /// Hours booked that week.
    pub hours: Decimal,
}
