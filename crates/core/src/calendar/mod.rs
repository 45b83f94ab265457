//! Month keys and month-range enumeration.

pub mod month;


pub use month::{MonthKey, ParseMonthKeyError, month_key, months_between, months_between_str, parse_date};
