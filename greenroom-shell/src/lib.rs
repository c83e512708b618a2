//! Greenroom shell: lifecycle & session orchestration for a client app.
//!
//! Sequences subsystem startup against the stored session, reacts to
//! foreground/background transitions, and gates features behind login
//! with a single-slot pending-request protocol.

mod boot;
mod context;
mod error;
mod loading;
mod login;
mod policy;
mod presence;
mod shell;

pub use boot::Bootstrapper;
pub use context::AppContext;
pub use error::BootError;
pub use loading::LoadingOverlay;
pub use login::{LoginCallback, LoginGate};
pub use policy::{failure_policy, BootStep, FailurePolicy};
pub use presence::PresenceController;
pub use shell::Shell;

/// Install the default tracing subscriber (`RUST_LOG`-style filtering,
/// `info` fallback). Safe to call more than once.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
