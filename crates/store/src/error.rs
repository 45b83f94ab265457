//! Store error types.

use std::path::PathBuf;

use planner_shared::AppError;
use thiserror::Error;

/// Snapshot store and export errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document file could not be read or written.
    #[error("I/O failed on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A document file is not a JSON array.
    #[error("Malformed document file {}: {source}", .path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// CSV serialization failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// There are no budgets to export.
    #[error("No budgets to export")]
    NothingToExport,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { .. } => Self::Storage(err.to_string()),
            StoreError::Parse { .. } => Self::Parse(err.to_string()),
            StoreError::Csv(_) => Self::Export(err.to_string()),
            StoreError::NothingToExport => Self::Validation(err.to_string()),
        }
    }
}
