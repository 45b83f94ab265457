//! Budget and personnel records, validation, and filtering.

pub mod de;
pub mod error;
pub mod service;
pub mod types;

pub use error::BudgetError;
pub use service::{BudgetService, CategoryFilter, LaborTotal, PersonAssignment};
pub use types::{Budget, BudgetStatus, LaborItem, Person, Snapshot};
