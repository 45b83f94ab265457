//! Budget and personnel collections stored as JSON document files.
//!
//! Each collection is a JSON array of documents. A missing file is an
//! empty collection. Field values are read leniently (see the record
//! deserializers in `planner-core`), but a document needs a UUID `id`:
//! budgets reference people by id, so a document without one, with a
//! non-UUID id, or that is not an object is skipped with a warning and its
//! hours never reach the engine. One bad document never hides the rest.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use planner_core::budget::{Budget, BudgetService, Person, Snapshot};
use planner_shared::config::DataConfig;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;

/// File-backed source of snapshots.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    budgets_path: PathBuf,
    personnel_path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over two collection files.
    #[must_use]
    pub fn new(budgets_path: impl Into<PathBuf>, personnel_path: impl Into<PathBuf>) -> Self {
        Self {
            budgets_path: budgets_path.into(),
            personnel_path: personnel_path.into(),
        }
    }

    /// Creates a store from application configuration.
    #[must_use]
    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.budgets_path(), config.personnel_path())
    }

    /// Path of the budgets collection.
    #[must_use]
    pub fn budgets_path(&self) -> &Path {
        &self.budgets_path
    }

    /// Path of the personnel collection.
    #[must_use]
    pub fn personnel_path(&self) -> &Path {
        &self.personnel_path
    }

    /// Reads both collections.
    ///
    /// Records failing validation are kept; the engine tolerates them, and
    /// a warning is logged.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let budgets: Vec<Budget> = read_collection(&self.budgets_path)?;
        let personnel: Vec<Person> = read_collection(&self.personnel_path)?;

        for budget in &budgets {
            if let Err(err) = BudgetService::validate_budget(budget) {
                warn!(budget_id = %budget.id, name = %budget.name, error = %err, "Budget failed validation");
            }
        }
        for person in &personnel {
            if let Err(err) = BudgetService::validate_person(person) {
                warn!(person_id = %person.id, name = %person.name, error = %err, "Person failed validation");
            }
        }

        debug!(
            budgets = budgets.len(),
            personnel = personnel.len(),
            "Snapshot loaded"
        );
        Ok(Snapshot::new(budgets, personnel))
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Collection file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let documents: Vec<Value> = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(documents
        .into_iter()
        .enumerate()
        .filter_map(|(index, doc)| match serde_json::from_value(doc) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(path = %path.display(), index, error = %err, "Skipping unreadable document");
                None
            }
        })
        .collect())
}
