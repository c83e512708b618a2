//! Boot-sequence scenario tests over recording fakes.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use greenroom_core::store::{KEY_LOGS, KEY_USER_ID, KEY_USER_INFO};
use greenroom_core::{MemoryStore, SessionStore, ShellConfig};
use greenroom_services::testing::RecordingSet;
use greenroom_shell::{BootError, Shell};
use serde_json::json;

fn logged_out_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

fn logged_in_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries([
        (KEY_USER_ID.to_string(), json!("u1")),
        (KEY_USER_INFO.to_string(), json!({"nickname": "ada"})),
    ]))
}

fn shell_with(store: Arc<MemoryStore>, set: &RecordingSet) -> Shell {
    Shell::new(store, set.services(), ShellConfig::default())
}

// ---------------------------------------------------------------------------
// 1. Session gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_session_means_zero_subsystem_calls() {
    let set = RecordingSet::new();
    let store = logged_out_store();
    let shell = shell_with(store.clone(), &set);

    shell.launch().await.expect("launch");

    assert_eq!(set.independent_init_calls(), 0);
    assert!(set.status.init_user_ids.lock().unwrap().is_empty());
    assert_eq!(set.transport.connect_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn launch_log_is_appended_even_when_logged_out() {
    let set = RecordingSet::new();
    let store = logged_out_store();
    let shell = shell_with(store.clone(), &set);

    shell.launch().await.expect("launch");

    let logs = store.get(KEY_LOGS).expect("logs written");
    assert_eq!(logs.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn session_initializes_every_independent_subsystem_once() {
    let set = RecordingSet::new();
    let shell = shell_with(logged_in_store(), &set);

    shell.launch().await.expect("launch");

    assert_eq!(set.presence.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(set.typing.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(set.notifications.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(set.analytics.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(set.offline_cache.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(set.transport.connect_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn status_manager_receives_the_stored_user_id() {
    let set = RecordingSet::new();
    let shell = shell_with(logged_in_store(), &set);

    shell.launch().await.expect("launch");

    let ids = set.status.init_user_ids.lock().unwrap();
    assert_eq!(ids.len(), 1, "status manager init exactly once");
    assert_eq!(ids[0].to_string(), "u1");
}

#[tokio::test]
async fn status_manager_skipped_without_distinct_user_id_key() {
    let set = RecordingSet::new();
    // userInfo present (session gate passes) but no userId entry.
    let store = Arc::new(MemoryStore::with_entries([(
        KEY_USER_INFO.to_string(),
        json!({"nickname": "ada"}),
    )]));
    let shell = shell_with(store, &set);

    shell.launch().await.expect("launch");

    assert_eq!(set.independent_init_calls(), 5);
    assert!(
        set.status.init_user_ids.lock().unwrap().is_empty(),
        "status manager must not run without a userId entry"
    );
}

// ---------------------------------------------------------------------------
// 2. Failure policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transport_failure_never_fails_launch() {
    let set = RecordingSet::new();
    set.transport.fail_connect.store(true, Ordering::SeqCst);
    let shell = shell_with(logged_in_store(), &set);

    shell.launch().await.expect("launch must tolerate transport failure");
    assert_eq!(set.transport.connect_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_cloud_capability_never_fails_launch() {
    let set = RecordingSet::new();
    set.host.cloud_missing.store(true, Ordering::SeqCst);
    let shell = shell_with(logged_in_store(), &set);

    shell.launch().await.expect("launch must tolerate missing capability");
    assert!(
        set.host.init_cloud_envs.lock().unwrap().is_empty(),
        "init_cloud must not run when the runtime is unavailable"
    );
}

#[tokio::test]
async fn cloud_capability_bound_to_configured_env() {
    let set = RecordingSet::new();
    let store = logged_out_store();
    let config = ShellConfig {
        cloud_env: "staging".to_string(),
        ..ShellConfig::default()
    };
    let shell = Shell::new(store, set.services(), config);

    shell.launch().await.expect("launch");
    assert_eq!(*set.host.init_cloud_envs.lock().unwrap(), vec!["staging"]);
}

#[tokio::test]
async fn notification_failure_aborts_boot() {
    let set = RecordingSet::new();
    set.notifications.fail_init.store(true, Ordering::SeqCst);
    let shell = shell_with(logged_in_store(), &set);

    let err = shell.launch().await.unwrap_err();
    match err {
        BootError::Subsystem { step, .. } => assert_eq!(step, "notifications"),
        other => panic!("expected Subsystem error, got: {other}"),
    }
    assert_eq!(
        set.transport.connect_calls.load(Ordering::SeqCst),
        0,
        "abort must happen before the transport step"
    );
}

#[tokio::test]
async fn status_manager_failure_aborts_boot() {
    let set = RecordingSet::new();
    set.status.fail_init.store(true, Ordering::SeqCst);
    let shell = shell_with(logged_in_store(), &set);

    let err = shell.launch().await.unwrap_err();
    assert!(matches!(err, BootError::Subsystem { step, .. } if step == "status_manager"));
}

// ---------------------------------------------------------------------------
// 3. Single-shot launch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_launch_is_rejected() {
    let set = RecordingSet::new();
    let shell = shell_with(logged_in_store(), &set);

    shell.launch().await.expect("first launch");
    let err = shell.launch().await.unwrap_err();
    assert!(matches!(err, BootError::AlreadyLaunched));

    assert_eq!(
        set.presence.init_calls.load(Ordering::SeqCst),
        1,
        "subsystems must not re-init on a rejected launch"
    );
}
