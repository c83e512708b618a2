//! The shell facade: one object wiring context, bootstrapper, presence
//! controller, login gate, and loading overlay over a shared store and
//! service set. This is the full in-process control surface exposed to
//! the host application.

use std::sync::Arc;

use serde_json::Value;

use greenroom_core::{LifecyclePhase, SessionStore, ShellConfig};
use greenroom_services::Services;

use crate::boot::Bootstrapper;
use crate::context::AppContext;
use crate::error::BootError;
use crate::loading::LoadingOverlay;
use crate::login::{LoginCallback, LoginGate};
use crate::presence::PresenceController;

pub struct Shell {
    ctx: AppContext,
    boot: Bootstrapper,
    presence: PresenceController,
    gate: LoginGate,
    loading: LoadingOverlay,
}

impl Shell {
    pub fn new(store: Arc<dyn SessionStore>, services: Services, config: ShellConfig) -> Self {
        let ctx = AppContext::new();
        let boot = Bootstrapper::new(
            store.clone(),
            services.clone(),
            config.clone(),
            ctx.clone(),
        );
        let presence = PresenceController::new(
            store.clone(),
            services,
            ctx.clone(),
            config.away_reason,
        );
        let gate = LoginGate::new(store, ctx.clone());
        Self {
            ctx,
            boot,
            presence,
            gate,
            loading: LoadingOverlay::new(),
        }
    }

    /// Run the boot sequence; exactly once per process.
    pub async fn launch(&self) -> Result<(), BootError> {
        self.boot.launch().await
    }

    /// App became visible.
    pub async fn on_foreground(&self) {
        self.presence.on_foreground().await;
    }

    /// App was hidden.
    pub fn on_background(&self) {
        self.presence.on_background();
    }

    pub fn request_login(&self, callback: Option<LoginCallback>) {
        self.gate.request_login(callback);
    }

    pub fn dismiss(&self) {
        self.gate.dismiss();
    }

    pub fn check_login(&self, prompt_if_absent: bool) -> bool {
        self.gate.check_login(prompt_if_absent)
    }

    pub fn on_login_success(&self, user: Value) {
        self.gate.on_login_success(user);
    }

    pub fn login_gate(&self) -> &LoginGate {
        &self.gate
    }

    pub fn loading(&self) -> &LoadingOverlay {
        &self.loading
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.ctx.phase()
    }

    /// In-memory user view recorded by `on_login_success`.
    pub fn user_info(&self) -> Option<Value> {
        self.ctx.user_info()
    }
}
