//! State-file error-message, atomic-write-safety, and reopen tests.
//! Storage layout: ~/.greenroom/state.json

use assert_fs::prelude::*;
use greenroom_core::store::{self, FileStore, SessionStore, KEY_USER_ID, KEY_USER_INFO};
use greenroom_core::{StoreError, UserId};
use predicates::prelude::predicate;
use serde_json::json;
use std::fs;

// ---------------------------------------------------------------------------
// 1. Open errors
// ---------------------------------------------------------------------------

#[test]
fn open_corrupt_state_returns_json_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let root = home.path().join(".greenroom");
    fs::create_dir_all(&root).expect("mkdir");
    fs::write(root.join("state.json"), b"{ not json !!!").expect("write");

    let err = FileStore::open_at(home.path()).unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("state.json"), "must contain file path, got: {msg}");
}

#[test]
fn open_missing_state_starts_empty() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = FileStore::open_at(home.path()).expect("open");
    assert!(store.get(KEY_USER_ID).is_none());
    assert!(store.session().is_none());
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn set_cleans_up_tmp_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = FileStore::open_at(home.path()).expect("open");
    store.set(KEY_USER_ID, json!("u1")).expect("set");

    let state_path = store::state_path_at(home.path());
    let tmp = state_path.with_extension("json.tmp");
    assert!(!tmp.exists(), ".tmp must be removed after successful set");
    home.child(".greenroom/state.json")
        .assert(predicate::path::exists());
}

#[test]
fn mid_write_crash_leaves_original_intact() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = FileStore::open_at(home.path()).expect("open");
    store.set(KEY_USER_ID, json!("u1")).expect("set");

    let state_path = store::state_path_at(home.path());
    let original_bytes = fs::read(&state_path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = state_path.with_extension("json.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(&state_path).expect("read after crash");
    assert_eq!(original_bytes, current_bytes, "original must be unchanged after crash");
}

#[test]
fn state_file_mode_is_0600() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = FileStore::open_at(home.path()).expect("open");
    store.set(KEY_USER_ID, json!("u1")).expect("set");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let state_path = store::state_path_at(home.path());
        let mode = fs::metadata(&state_path).expect("meta").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "expected 0600, got {mode:o}");
    }
}

// ---------------------------------------------------------------------------
// 3. Persistence across reopen
// ---------------------------------------------------------------------------

#[test]
fn session_survives_reopen() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    {
        let store = FileStore::open_at(home.path()).expect("open");
        store.set(KEY_USER_ID, json!("u1")).expect("set userId");
        store
            .set(KEY_USER_INFO, json!({"nickname": "ada"}))
            .expect("set userInfo");
    }

    let reopened = FileStore::open_at(home.path()).expect("reopen");
    let session = reopened.session().expect("session present after reopen");
    assert_eq!(session.user_id, UserId::from("u1"));
    assert_eq!(session.user_info["nickname"], json!("ada"));
}

#[test]
fn remove_persists_across_reopen() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    {
        let store = FileStore::open_at(home.path()).expect("open");
        store.set(KEY_USER_ID, json!("u1")).expect("set");
        store.remove(KEY_USER_ID).expect("remove");
    }

    let reopened = FileStore::open_at(home.path()).expect("reopen");
    assert!(reopened.user_id().is_none(), "removed key must stay gone");
}

#[test]
fn launch_logs_accumulate_across_reopen() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    {
        let store = FileStore::open_at(home.path()).expect("open");
        store.append_log(json!(100)).expect("append");
    }
    {
        let store = FileStore::open_at(home.path()).expect("reopen");
        store.append_log(json!(200)).expect("append");
    }

    let store = FileStore::open_at(home.path()).expect("reopen again");
    assert_eq!(
        store.get(store::KEY_LOGS),
        Some(json!([200, 100])),
        "logs must persist and stay newest-first"
    );
}
