//! Budget and personnel validation errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Record validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Budget name is empty.
    #[error("Budget name is required")]
    MissingName,

    /// Total hours must be positive.
    #[error("Budget total hours must be greater than zero")]
    NonPositiveTotalHours,

    /// A breakdown entry lacks a type or hours.
    #[error("Labor breakdown entry {index} needs a type and non-zero hours")]
    IncompleteLaborItem {
        /// Position in the breakdown.
        index: usize,
    },

    /// Start date after end date.
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Person name is empty.
    #[error("Person name is required")]
    MissingPersonName,

    /// Person labor type is empty.
    #[error("Person labor type is required")]
    MissingLaborType,

    /// Hours per day and days per week must both be positive.
    #[error("Hours per day and days per week must be greater than zero")]
    NonPositiveAvailability,
}
