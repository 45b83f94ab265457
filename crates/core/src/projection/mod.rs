//! Finish-date projection and weekly occupation schedules.

pub mod projector;
pub mod types;

pub use projector::FinishProjector;
pub use types::{FinishProjection, WeekSlot};
