//! Login gating: one shared modal, one pending-callback slot.
//!
//! Any caller can demand an authenticated session via
//! [`LoginGate::request_login`]; the slot holds at most one pending
//! continuation. A newer request replaces the slot and the displaced
//! continuation is dropped without ever being invoked — deliberate
//! policy, not a queue. [`LoginGate::on_login_success`] is the single
//! affirmative resolution path; [`LoginGate::dismiss`] hides the modal
//! without resolving (the parked continuation is discarded when
//! overwritten or the process ends).
//!
//! Visibility reaches UI surfaces through a watch subscription, so a
//! surface activated after the gate opened still observes the current
//! value.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::watch;

use greenroom_core::SessionStore;

use crate::context::AppContext;

/// Continuation resolved with `true` when login completes.
pub type LoginCallback = Box<dyn FnOnce(bool) + Send>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct LoginGate {
    store: Arc<dyn SessionStore>,
    ctx: AppContext,
    pending: Mutex<Option<LoginCallback>>,
    visible_tx: watch::Sender<bool>,
}

impl LoginGate {
    pub fn new(store: Arc<dyn SessionStore>, ctx: AppContext) -> Self {
        let (visible_tx, _) = watch::channel(false);
        Self {
            store,
            ctx,
            pending: Mutex::new(None),
            visible_tx,
        }
    }

    /// Open the shared login modal and park `callback` in the single
    /// pending slot, replacing whatever was there.
    pub fn request_login(&self, callback: Option<LoginCallback>) {
        {
            let mut slot = lock(&self.pending);
            if slot.is_some() {
                tracing::debug!("pending login request displaced by a newer one");
            }
            *slot = callback;
        }
        self.visible_tx.send_replace(true);
    }

    /// Hide the modal without resolving the pending callback.
    pub fn dismiss(&self) {
        self.visible_tx.send_replace(false);
    }

    /// Whether the modal is currently shown.
    pub fn visible(&self) -> bool {
        *self.visible_tx.borrow()
    }

    /// Subscribe to visibility changes. Receivers created after a
    /// change still see the current value.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible_tx.subscribe()
    }

    /// Synchronous session-identifier check. When absent and
    /// `prompt_if_absent`, opens the gate with no callback as a side
    /// effect; returns `false` either way.
    pub fn check_login(&self, prompt_if_absent: bool) -> bool {
        if self.store.user_id().is_some() {
            return true;
        }
        if prompt_if_absent {
            self.request_login(None);
        }
        false
    }

    /// Login completed: record the user, resolve the pending callback
    /// with `true` (exactly once), and hide the modal.
    pub fn on_login_success(&self, user: Value) {
        self.ctx.set_user_info(user);

        let callback = lock(&self.pending).take();
        if let Some(callback) = callback {
            callback(true);
        }

        self.dismiss();
    }
}
