//! Capacity allocation engine for the resource-capacity planner.
//!
//! This crate contains pure computation with ZERO storage or transport
//! dependencies. Every function is a deterministic transformation of the
//! budget and personnel snapshot it is given.
//!
//! # Modules
//!
//! - `calendar` - Month keys and month-range enumeration
//! - `budget` - Budget and personnel records, validation, filtering
//! - `capacity` - Hour distribution, capacity model, aggregation engine
//! - `projection` - Finish-date projection and weekly occupation schedules

pub mod budget;
pub mod calendar;
pub mod capacity;
pub mod projection;
