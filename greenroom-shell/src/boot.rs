//! Boot sequence: capability probe, launch log, session gate, subsystem
//! initialization.
//!
//! Runs exactly once per process. With no stored session the app stays
//! fully inert — zero subsystem calls. With a session, the five
//! independent subsystems init concurrently with no completion-order
//! assumption, the status manager inits only when a distinct `userId`
//! key exists, and the transport connects last. Failures are settled
//! through the [`failure_policy`](crate::failure_policy) table.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use greenroom_core::{SessionStore, ShellConfig};
use greenroom_services::{ServiceError, Services};

use crate::context::AppContext;
use crate::error::BootError;
use crate::policy::{failure_policy, BootStep, FailurePolicy};

pub struct Bootstrapper {
    store: Arc<dyn SessionStore>,
    services: Services,
    config: ShellConfig,
    ctx: AppContext,
}

impl Bootstrapper {
    pub fn new(
        store: Arc<dyn SessionStore>,
        services: Services,
        config: ShellConfig,
        ctx: AppContext,
    ) -> Self {
        Self {
            store,
            services,
            config,
            ctx,
        }
    }

    /// Run the boot sequence. A second call in the same process fails
    /// with [`BootError::AlreadyLaunched`].
    pub async fn launch(&self) -> Result<(), BootError> {
        if !self.ctx.try_begin_launch() {
            return Err(BootError::AlreadyLaunched);
        }

        // 1. Capability probe — missing cloud runtime degrades, never aborts.
        let capability = if self.services.host.cloud_available() {
            self.services.host.init_cloud(&self.config.cloud_env);
            tracing::info!(env = %self.config.cloud_env, "cloud runtime bound");
            Ok(())
        } else {
            Err(ServiceError::init("host", "cloud runtime unavailable"))
        };
        self.settle(BootStep::Capability, capability)?;

        // 2. Diagnostic launch trail, unconditional.
        self.store
            .append_log(json!(Utc::now().timestamp_millis()))?;

        // 3. Session gate, keyed on the `userInfo` entry the login flow
        // writes. Absent session = defined inert state, not an error.
        if self.store.user_info().is_none() {
            tracing::info!("no stored session; subsystems stay uninitialized");
            return Ok(());
        }
        tracing::info!("stored session found");

        // 4. Independent subsystems; any interleaving is acceptable.
        let (presence, typing, notifications, analytics, offline_cache) = tokio::join!(
            self.services.presence.init(),
            async { self.services.typing.init() },
            self.services.notifications.init(),
            async { self.services.analytics.init() },
            self.services.offline_cache.init(),
        );
        self.settle(BootStep::Presence, presence)?;
        self.settle(BootStep::Typing, typing)?;
        self.settle(BootStep::Notifications, notifications)?;
        self.settle(BootStep::Analytics, analytics)?;
        self.settle(BootStep::OfflineCache, offline_cache)?;

        // Status manager keys off the distinct `userId` entry, a weaker
        // precondition than the session itself.
        if let Some(user_id) = self.store.user_id() {
            let result = self.services.status.init(&user_id).await;
            self.settle(BootStep::StatusManager, result)?;
        } else {
            tracing::debug!("no userId entry; status manager skipped");
        }

        // Auto-started on construction; nothing to call.
        tracing::info!(
            running = self.services.offline_queue.is_running(),
            "offline queue active"
        );
        tracing::info!(
            running = self.services.perf.is_running(),
            "performance monitor active"
        );

        // 5. Transport last. A failed connect leaves the app on its
        // polling fallback; the retry policy lives in the transport.
        let connect = self
            .services
            .transport
            .connect()
            .await
            .map_err(|e| ServiceError::init("transport", e.to_string()));
        self.settle(BootStep::Transport, connect)?;

        tracing::info!("boot sequence complete");
        Ok(())
    }

    fn settle(&self, step: BootStep, result: Result<(), ServiceError>) -> Result<(), BootError> {
        match result {
            Ok(()) => {
                tracing::info!(step = step.name(), "boot step ready");
                Ok(())
            }
            Err(source) => match failure_policy(step) {
                FailurePolicy::Continue => {
                    tracing::error!(step = step.name(), error = %source, "boot step failed; continuing");
                    Ok(())
                }
                FailurePolicy::Abort => Err(BootError::Subsystem {
                    step: step.name(),
                    source,
                }),
            },
        }
    }
}
