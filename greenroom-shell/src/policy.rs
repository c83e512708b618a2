//! Per-step boot failure policy.
//!
//! Every boot step's outcome is evaluated against one table instead of
//! ad hoc catch blocks: the capability probe and the realtime transport
//! tolerate failure (the app degrades), every other subsystem aborts
//! the remaining sequence. The asymmetry is intentional and auditable
//! here.

use std::fmt;

/// A named step of the boot sequence, in nominal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStep {
    Capability,
    Presence,
    Typing,
    Notifications,
    Analytics,
    OfflineCache,
    StatusManager,
    Transport,
}

impl BootStep {
    pub const ALL: [BootStep; 8] = [
        BootStep::Capability,
        BootStep::Presence,
        BootStep::Typing,
        BootStep::Notifications,
        BootStep::Analytics,
        BootStep::OfflineCache,
        BootStep::StatusManager,
        BootStep::Transport,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BootStep::Capability => "capability",
            BootStep::Presence => "presence",
            BootStep::Typing => "typing",
            BootStep::Notifications => "notifications",
            BootStep::Analytics => "analytics",
            BootStep::OfflineCache => "offline_cache",
            BootStep::StatusManager => "status_manager",
            BootStep::Transport => "transport",
        }
    }
}

impl fmt::Display for BootStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and keep booting (degraded functionality).
    Continue,
    /// Stop the boot sequence and surface the error.
    Abort,
}

/// The policy table.
pub const fn failure_policy(step: BootStep) -> FailurePolicy {
    match step {
        BootStep::Capability | BootStep::Transport => FailurePolicy::Continue,
        BootStep::Presence
        | BootStep::Typing
        | BootStep::Notifications
        | BootStep::Analytics
        | BootStep::OfflineCache
        | BootStep::StatusManager => FailurePolicy::Abort,
    }
}
