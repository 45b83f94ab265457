//! Snapshot store and export collaborators for the capacity planner.
//!
//! The engine in `planner-core` never touches storage. This crate supplies
//! it with snapshots:
//! - `files` - Budget and personnel collections as JSON document files
//! - `watcher` - Explicit "data changed" notification over a watch channel
//! - `export` - CSV export of raw budget records

pub mod error;
pub mod export;
pub mod files;
pub mod watcher;

pub use error::StoreError;
pub use export::{CSV_HEADER, export_budgets_csv, write_budgets_csv};
pub use files::JsonFileStore;
pub use watcher::{MIN_POLL_INTERVAL, SnapshotWatcher};
