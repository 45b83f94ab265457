//! Explicit change notification for snapshot consumers.
//!
//! The watcher re-reads the store on `poll` and publishes a new snapshot
//! only when its content fingerprint changed. Consumers hold a
//! `watch::Receiver` and re-run the engine each time it reports a change.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use planner_core::budget::Snapshot;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::files::JsonFileStore;

/// Shortest polling period accepted by [`SnapshotWatcher::run`].
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Publishes snapshots of a [`JsonFileStore`] as they change.
pub struct SnapshotWatcher {
    store: JsonFileStore,
    sender: watch::Sender<Arc<Snapshot>>,
    fingerprint: u64,
}

impl SnapshotWatcher {
    /// Loads the initial snapshot and starts publishing it.
    pub fn new(store: JsonFileStore) -> Result<Self, StoreError> {
        let snapshot = store.load()?;
        let fingerprint = snapshot.fingerprint();
        let (sender, _) = watch::channel(Arc::new(snapshot));
        Ok(Self {
            store,
            sender,
            fingerprint,
        })
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.sender.subscribe()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<Snapshot> {
        self.sender.borrow().clone()
    }

    /// Re-reads the store; publishes and returns `true` if the data changed.
    pub fn poll(&mut self) -> Result<bool, StoreError> {
        let snapshot = self.store.load()?;
        let fingerprint = snapshot.fingerprint();
        if fingerprint == self.fingerprint {
            return Ok(false);
        }

        info!(
            budgets = snapshot.budgets.len(),
            personnel = snapshot.personnel.len(),
            "Snapshot changed"
        );
        self.fingerprint = fingerprint;
        self.sender.send_replace(Arc::new(snapshot));
        Ok(true)
    }

    /// Polls every `interval` until `shutdown` resolves.
    ///
    /// Intervals below one millisecond are raised to one millisecond. Read
    /// errors are logged and the previous snapshot stays published.
    pub async fn run<F>(mut self, interval: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval.max(MIN_POLL_INTERVAL));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    if let Err(err) = self.poll() {
                        warn!(error = %err, "Snapshot poll failed");
                    }
                }
            }
        }
    }
}
