//! Shared app-wide state with an explicit owner.
//!
//! Replaces ambient global state: constructed once at process start
//! and passed by cheap clone to whichever component needs it. All
//! writers run on the cooperative scheduler, so plain mutexes suffice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use greenroom_core::LifecyclePhase;
use serde_json::Value;

#[derive(Default)]
struct ContextInner {
    phase: Mutex<LifecyclePhase>,
    user_info: Mutex<Option<Value>>,
    launched: AtomicBool,
}

/// Process-wide shared state handle. Clones share the same state.
#[derive(Clone, Default)]
pub struct AppContext {
    inner: Arc<ContextInner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase; starts at [`LifecyclePhase::Launching`].
    pub fn phase(&self) -> LifecyclePhase {
        *lock(&self.inner.phase)
    }

    pub(crate) fn set_phase(&self, phase: LifecyclePhase) {
        let mut current = lock(&self.inner.phase);
        if *current != phase {
            tracing::debug!(from = %current, to = %phase, "lifecycle transition");
            *current = phase;
        }
    }

    /// In-memory view of the signed-in user, set by `on_login_success`.
    pub fn user_info(&self) -> Option<Value> {
        lock(&self.inner.user_info).clone()
    }

    pub(crate) fn set_user_info(&self, user: Value) {
        *lock(&self.inner.user_info) = Some(user);
    }

    /// First caller wins; every later call sees `false`.
    pub(crate) fn try_begin_launch(&self) -> bool {
        !self.inner.launched.swap(true, Ordering::SeqCst)
    }
}
