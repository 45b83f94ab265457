//! Calendar month arithmetic.
//!
//! A [`MonthKey`] identifies one calendar month and renders as `YYYY-MM`.
//! Ordering of keys is chronological, which is also the lexical order of
//! their rendered form for four-digit years.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// Error returned when a string is not a valid `YYYY-MM` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month key: {0}")]
pub struct ParseMonthKeyError(pub String);

impl MonthKey {
    /// Creates a month key, returning `None` for a month outside 1-12 or a
    /// year outside the supported date range.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month of the year, 1-12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The following calendar month.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMonthKeyError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Month key of a date.
#[must_use]
pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey::of(date)
}

/// Every month from `start`'s month through `end`'s month, inclusive.
///
/// Empty when `end` falls in an earlier month than `start`.
#[must_use]
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<MonthKey> {
    let last = MonthKey::of(end);
    let mut current = MonthKey::of(start);
    let mut months = Vec::new();
    while current <= last {
        months.push(current);
        current = current.next();
    }
    months
}

/// Same as [`months_between`] for raw date strings.
///
/// Returns an empty sequence when either string is not a date.
#[must_use]
pub fn months_between_str(start: &str, end: &str) -> Vec<MonthKey> {
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => months_between(start, end),
        _ => Vec::new(),
    }
}

/// Parses `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp into a calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
