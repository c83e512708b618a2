use greenroom_core::StoreError;
use greenroom_services::ServiceError;
use thiserror::Error;

/// Error surface for the boot sequence.
#[derive(Debug, Error)]
pub enum BootError {
    /// `launch()` ran before in this process; it runs exactly once.
    #[error("launch() already ran in this process")]
    AlreadyLaunched,

    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    /// A subsystem whose failure policy is `Abort` failed to init.
    #[error("boot step '{step}' failed: {source}")]
    Subsystem {
        step: &'static str,
        #[source]
        source: ServiceError,
    },
}
