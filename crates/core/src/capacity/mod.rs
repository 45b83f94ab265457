//! Capacity allocation: hour distribution, capacity model, and aggregation.

pub mod cache;
pub mod distribution;
pub mod engine;
pub mod types;


pub use cache::CapacityCache;
pub use distribution::{
    HourDistribution, WEEKS_PER_MONTH, distribute_hours_per_month, monthly_capacity_for_person,
    weekly_capacity_for_person,
};
pub use engine::CapacityEngine;
pub use types::{
    AllocationStatus, CapacityReport, CapacityRow, OccupationRow, OccupationSeries, WorkloadRow,
};
