//! Lenient field deserializers for loosely-typed store documents.
//!
//! Records come from a document store that does not enforce a schema.
//! Numbers may arrive as strings, dates as empty strings, and fields may be
//! missing or `null`. These helpers coerce instead of failing so that one
//! malformed document never blanks out a whole report.

use std::str::FromStr;

use chrono::NaiveDate;
use planner_shared::types::PersonId;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::BudgetStatus;
use crate::calendar::parse_date;

/// Coerces a JSON value to hours. Anything non-numeric becomes zero.
#[must_use]
pub fn coerce_hours(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(raw: &str) -> Decimal {
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

/// Hours field: missing, `null`, or malformed values read as zero.
pub fn hours<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, coerce_hours))
}

/// Date field: missing, empty, or unparseable values read as absent.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_date(&s),
        _ => None,
    })
}

/// Text field: numbers are stringified, anything else non-textual is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Status field: unknown or missing labels read as [`BudgetStatus::Unknown`].
pub fn status<'de, D>(deserializer: D) -> Result<BudgetStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => BudgetStatus::from_label(&s),
        _ => BudgetStatus::Unknown,
    })
}

/// Personnel reference list: entries that are not ids are dropped.
pub fn person_ids<'de, D>(deserializer: D) -> Result<Vec<PersonId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|s| PersonId::from_str(s).ok())
        .collect())
}
