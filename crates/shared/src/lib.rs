//! Shared identifiers, errors, and configuration for the capacity planner.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for budget and personnel references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
