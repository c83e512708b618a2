//! Foreground/background lifecycle reactions.
//!
//! Foregrounding marks the user online and retries the realtime
//! connection; backgrounding marks the user away. Neither operation
//! can fail from the caller's perspective, and both are safe to call
//! repeatedly — idempotence of the underlying state is delegated to
//! the presence tracker and transport.

use std::sync::Arc;

use greenroom_core::{LifecyclePhase, SessionStore};
use greenroom_services::Services;

use crate::context::AppContext;

pub struct PresenceController {
    store: Arc<dyn SessionStore>,
    services: Services,
    ctx: AppContext,
    away_reason: String,
}

impl PresenceController {
    pub fn new(
        store: Arc<dyn SessionStore>,
        services: Services,
        ctx: AppContext,
        away_reason: String,
    ) -> Self {
        Self {
            store,
            services,
            ctx,
            away_reason,
        }
    }

    /// App became visible: go online and reconnect the realtime channel.
    /// A failed reconnect is logged, never escalated.
    pub async fn on_foreground(&self) {
        self.ctx.set_phase(LifecyclePhase::Foreground);

        if self.store.user_info().is_none() {
            return;
        }
        self.services.presence.set_online();

        // Reconnect keys off the `userId` entry, like the status manager.
        if self.store.user_id().is_some() {
            if let Err(err) = self.services.transport.connect().await {
                tracing::error!(error = %err, "transport reconnect failed; polling fallback stays active");
            }
        }
    }

    /// App was hidden: mark the user away. The transport stays
    /// connected; its own idle policy governs teardown.
    pub fn on_background(&self) {
        self.ctx.set_phase(LifecyclePhase::Background);

        if self.store.user_info().is_some() {
            self.services.presence.set_away(&self.away_reason);
        }
    }
}
