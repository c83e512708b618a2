use thiserror::Error;

/// Initialization failure reported by a subsystem seam.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{service} init failed: {reason}")]
    Init {
        service: &'static str,
        reason: String,
    },
}

impl ServiceError {
    pub fn init(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Init {
            service,
            reason: reason.into(),
        }
    }
}

/// Failure establishing the realtime channel.
///
/// Always caught by the shell: boot and foregrounding degrade to the
/// transport's polling fallback instead of failing.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("transport unreachable: {0}")]
    Unreachable(String),

    #[error("transport handshake rejected: {0}")]
    Rejected(String),
}
