//! Snapshot change notification tests.

use std::fs;
use std::time::Duration;

use planner_core::budget::Snapshot;
use planner_store::{JsonFileStore, SnapshotWatcher};
use tempfile::TempDir;

const BUDGET_ID: &str = "0191f0a8-2a4e-7c3b-9c1e-3f5d2b8a7e11";

/// Replaces the budgets file atomically so a concurrent poll never sees a
/// half-written document.
fn write_budget(dir: &TempDir, name: &str) {
    let staging = dir.path().join("budgets.json.tmp");
    fs::write(
        &staging,
        format!(r#"[{{"id": "{BUDGET_ID}", "name": "{name}"}}]"#),
    )
    .unwrap();
    fs::rename(staging, dir.path().join("budgets.json")).unwrap();
}

fn named(snapshot: &Snapshot, name: &str) -> bool {
    snapshot.budgets.first().is_some_and(|b| b.name == name)
}

fn watcher_for(dir: &TempDir) -> SnapshotWatcher {
    let store = JsonFileStore::new(
        dir.path().join("budgets.json"),
        dir.path().join("personnel.json"),
    );
    SnapshotWatcher::new(store).unwrap()
}

#[test]
fn test_unchanged_data_is_not_republished() {
    let dir = TempDir::new().unwrap();
    write_budget(&dir, "Alpha");
    let mut watcher = watcher_for(&dir);
    let rx = watcher.subscribe();

    assert!(!watcher.poll().unwrap());
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn test_change_is_published() {
    let dir = TempDir::new().unwrap();
    write_budget(&dir, "Alpha");
    let mut watcher = watcher_for(&dir);
    let mut rx = watcher.subscribe();

    write_budget(&dir, "Beta");

    assert!(watcher.poll().unwrap());
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().budgets[0].name, "Beta");
    assert_eq!(watcher.current().budgets[0].name, "Beta");
}

#[test]
fn test_failed_poll_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    write_budget(&dir, "Alpha");
    let mut watcher = watcher_for(&dir);

    fs::write(dir.path().join("budgets.json"), "not json").unwrap();

    assert!(watcher.poll().is_err());
    assert_eq!(watcher.current().budgets[0].name, "Alpha");
}

#[tokio::test]
async fn test_run_with_zero_interval_still_polls() {
    let dir = TempDir::new().unwrap();
    write_budget(&dir, "Alpha");
    let watcher = watcher_for(&dir);
    let mut rx = watcher.subscribe();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let task = tokio::spawn(watcher.run(Duration::ZERO, async {
        let _ = stop_rx.await;
    }));

    write_budget(&dir, "Gamma");
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| named(s, "Gamma")))
        .await
        .expect("no change published")
        .unwrap();

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("watcher did not stop")
        .expect("watcher task panicked");
}

#[tokio::test]
async fn test_run_publishes_until_shutdown() {
    let dir = TempDir::new().unwrap();
    write_budget(&dir, "Alpha");
    let watcher = watcher_for(&dir);
    let mut rx = watcher.subscribe();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let task = tokio::spawn(watcher.run(Duration::from_millis(10), async {
        let _ = stop_rx.await;
    }));

    write_budget(&dir, "Beta");
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| named(s, "Beta")))
        .await
        .expect("no change published")
        .unwrap();

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("watcher did not stop")
        .unwrap();
}
