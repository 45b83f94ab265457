//! Capacity report caching using Moka.
//!
//! The engine is pure, so a report only changes when its snapshot does.
//! Callers that re-render often can memoize the whole call keyed by the
//! snapshot fingerprint instead of recomputing.

use moka::sync::Cache;
use planner_shared::config::CacheConfig;
use std::sync::Arc;
use std::time::Duration;

use super::engine::CapacityEngine;
use super::types::CapacityReport;
use crate::budget::Snapshot;

/// Cache for capacity reports.
///
/// Thread-safe and suitable for concurrent access.
#[derive(Clone)]
pub struct CapacityCache {
    cache: Cache<u64, Arc<CapacityReport>>,
}

impl CapacityCache {
    /// Creates a cache with the configuration defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Creates a cache holding at most `max_capacity` reports, each for
    /// `ttl_secs` seconds.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Creates a report cache from application configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Returns the report for `snapshot`, computing it on a miss.
    #[must_use]
    pub fn report(&self, snapshot: &Snapshot) -> Arc<CapacityReport> {
        self.cache
            .get_with(snapshot.fingerprint(), || Arc::new(CapacityEngine::analyze(snapshot)))
    }

    /// Whether a report for `snapshot` is cached.
    #[must_use]
    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        self.cache.contains_key(&snapshot.fingerprint())
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flushes pending maintenance so `entry_count` is current.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for CapacityCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{Budget, BudgetStatus, Person};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn snapshot() -> Snapshot {
        let person = Person::new("Ana", "Eng", dec!(8), dec!(5));
        let budget = Budget::new("Plant upgrade")
            .with_status(BudgetStatus::Accepted)
            .with_labor("Eng", dec!(120))
            .with_dates(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            )
            .assign(person.id);
        Snapshot::new(vec![budget], vec![person])
    }

    #[test]
    fn test_cached_report_matches_fresh_analysis() {
        let cache = CapacityCache::new();
        let snapshot = snapshot();

        let report = cache.report(&snapshot);

        assert_eq!(*report, CapacityEngine::analyze(&snapshot));
        assert!(cache.contains(&snapshot));
    }

    #[test]
    fn test_same_snapshot_hits_cache() {
        let cache = CapacityCache::new();
        let snapshot = snapshot();

        let first = cache.report(&snapshot);
        let second = cache.report(&snapshot.clone());

        assert!(Arc::ptr_eq(&first, &second));
        cache.run_pending_tasks();
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_changed_snapshot_misses_cache() {
        let cache = CapacityCache::new();
        let snapshot = snapshot();
        let first = cache.report(&snapshot);

        let mut changed = snapshot.clone();
        changed.personnel[0].days_per_week = dec!(4);
        let second = cache.report(&changed);

        assert!(!Arc::ptr_eq(&first, &second));
        assert_ne!(first.capacity[0].available, second.capacity[0].available);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = CapacityCache::new();
        let snapshot = snapshot();
        let _ = cache.report(&snapshot);

        cache.invalidate_all();
        cache.run_pending_tasks();

        assert_eq!(cache.entry_count(), 0);
        assert!(!cache.contains(&snapshot));
    }
}
