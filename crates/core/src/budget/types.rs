//! Budget and personnel record types.
//!
//! Records are owned by the external store; the engine only reads them.
//! Fields the engine does not know about are kept in `extra` and passed
//! through untouched.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use planner_shared::types::{BudgetId, PersonId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de;

/// Budget lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Accepted work; the only status that counts as required capacity.
    Accepted,
    /// Quoted but not yet accepted.
    Pending,
    /// Finished.
    Completed,
    /// Paused.
    #[serde(rename = "On Hold")]
    OnHold,
    /// Missing or unrecognised label.
    #[default]
    #[serde(other)]
    Unknown,
}

impl BudgetStatus {
    /// Maps a stored label to a status.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Accepted" => Self::Accepted,
            "Pending" => Self::Pending,
            "Completed" => Self::Completed,
            "On Hold" => Self::OnHold,
            _ => Self::Unknown,
        }
    }

    /// Stored label; empty for [`BudgetStatus::Unknown`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hours required from one labor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborItem {
    /// Labor type key, matched against [`Person::labor_type`].
    #[serde(rename = "type", default, deserialize_with = "de::text")]
    pub labor_type: String,
    /// Required hours.
    #[serde(default, deserialize_with = "de::hours")]
    pub hours: Decimal,
}

impl LaborItem {
    /// Creates a labor item.
    #[must_use]
    pub fn new(labor_type: impl Into<String>, hours: Decimal) -> Self {
        Self {
            labor_type: labor_type.into(),
            hours,
        }
    }
}

/// A budgeted project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Project name.
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    /// Quoted total hours.
    #[serde(default, deserialize_with = "de::hours")]
    pub total_hours: Decimal,
    /// Hours per labor type, in entry order.
    #[serde(default)]
    pub labor_breakdown: Vec<LaborItem>,
    /// First day of work (inclusive).
    #[serde(default, deserialize_with = "de::date")]
    pub start_date: Option<NaiveDate>,
    /// Last day of work (inclusive).
    #[serde(default, deserialize_with = "de::date")]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    #[serde(default, deserialize_with = "de::status")]
    pub status: BudgetStatus,
    /// Free-text category used for filtering.
    #[serde(default, deserialize_with = "de::text")]
    pub category: String,
    /// Personnel assigned to the project.
    #[serde(default, deserialize_with = "de::person_ids")]
    pub assigned_personnel: Vec<PersonId>,
    /// Fields the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Budget {
    /// Creates an empty budget with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            total_hours: Decimal::ZERO,
            labor_breakdown: Vec::new(),
            start_date: None,
            end_date: None,
            status: BudgetStatus::Unknown,
            category: String::new(),
            assigned_personnel: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: BudgetStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets both dates.
    #[must_use]
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Appends a labor item and adds its hours to the total.
    #[must_use]
    pub fn with_labor(mut self, labor_type: impl Into<String>, hours: Decimal) -> Self {
        self.total_hours += hours;
        self.labor_breakdown.push(LaborItem::new(labor_type, hours));
        self
    }

    /// Assigns a person.
    #[must_use]
    pub fn assign(mut self, person: PersonId) -> Self {
        self.assigned_personnel.push(person);
        self
    }

    /// Whether both dates are set.
    #[must_use]
    pub const fn has_dates(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Whether `person` is assigned.
    #[must_use]
    pub fn is_assigned(&self, person: PersonId) -> bool {
        self.assigned_personnel.contains(&person)
    }

    /// First breakdown entry of `labor_type`.
    #[must_use]
    pub fn labor_item(&self, labor_type: &str) -> Option<&LaborItem> {
        self.labor_breakdown
            .iter()
            .find(|item| item.labor_type == labor_type)
    }
}

/// A member of the personnel roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Person ID.
    pub id: PersonId,
    /// Display name.
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    /// Labor type key.
    #[serde(default, deserialize_with = "de::text")]
    pub labor_type: String,
    /// Nominal hours per working day.
    #[serde(default, deserialize_with = "de::hours")]
    pub hours_per_day: Decimal,
    /// Nominal working days per week.
    #[serde(default, deserialize_with = "de::hours")]
    pub days_per_week: Decimal,
    /// Fields the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    /// Creates a person with a fresh ID.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        labor_type: impl Into<String>,
        hours_per_day: Decimal,
        days_per_week: Decimal,
    ) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            labor_type: labor_type.into(),
            hours_per_day,
            days_per_week,
            extra: Map::new(),
        }
    }
}

/// The budget and personnel collections as seen at one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All budgets.
    #[serde(default)]
    pub budgets: Vec<Budget>,
    /// The personnel roster.
    #[serde(default)]
    pub personnel: Vec<Person>,
}

impl Snapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(budgets: Vec<Budget>, personnel: Vec<Person>) -> Self {
        Self { budgets, personnel }
    }

    /// Content fingerprint; equal snapshots have equal fingerprints.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        hasher.finish()
    }

    /// Looks up a person by ID.
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.personnel.iter().find(|p| p.id == id)
    }

    /// Looks up a budget by ID.
    #[must_use]
    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }
}
