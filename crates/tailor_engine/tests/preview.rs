use std::fs;

use tailor_engine::{PreviewManager, PreviewStore};
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> PreviewStore {
    PreviewStore::new(temp.path().join("spool")).unwrap()
}

#[test]
fn acquire_spools_bytes_and_release_removes_them() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);

    let handle = store.acquire(b"%PDF-1.4 demo").unwrap();
    assert_eq!(store.live_handles(), 1);
    assert_eq!(fs::read(handle.path()).unwrap(), b"%PDF-1.4 demo");

    let path = handle.path().to_path_buf();
    store.release(handle);
    assert_eq!(store.live_handles(), 0);
    assert!(!path.exists());
}

#[test]
fn serials_are_unique_across_acquisitions() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);

    let first = store.acquire(b"a").unwrap();
    let first_serial = first.serial();
    store.release(first);
    let second = store.acquire(b"b").unwrap();

    assert_ne!(first_serial, second.serial());
    store.release(second);
}

#[test]
fn present_replaces_prior_handle_and_never_holds_two() {
    let temp = TempDir::new().unwrap();
    let mut manager = PreviewManager::new(store_in(&temp));

    let first_path = manager.present(b"first").unwrap();
    assert_eq!(manager.live_handles(), 1);

    let second_path = manager.present(b"second").unwrap();
    // Revoke-then-create: the old spool file is gone before the new handle
    // exists, and exactly one handle is ever live.
    assert_eq!(manager.live_handles(), 1);
    assert!(!first_path.exists());
    assert_eq!(fs::read(&second_path).unwrap(), b"second");
    assert_eq!(manager.current_path(), Some(second_path.as_path()));
}

#[test]
fn revoke_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let mut manager = PreviewManager::new(store_in(&temp));

    // Nothing presented yet: a revoke is harmless.
    manager.revoke();
    assert_eq!(manager.live_handles(), 0);

    let path = manager.present(b"doc").unwrap();
    manager.revoke();
    manager.revoke();

    assert_eq!(manager.live_handles(), 0);
    assert!(!path.exists());
    assert_eq!(manager.current_path(), None);
}

#[test]
fn release_survives_an_already_deleted_spool_file() {
    let temp = TempDir::new().unwrap();
    let mut store = store_in(&temp);

    let handle = store.acquire(b"doc").unwrap();
    fs::remove_file(handle.path()).unwrap();

    // The handle is still spent cleanly.
    store.release(handle);
    assert_eq!(store.live_handles(), 0);
}
