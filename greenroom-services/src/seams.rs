//! Trait seams for the eight collaborating subsystems.
//!
//! The shell consumes these interfaces only; the real implementations
//! (persistence, timers, wire protocols, retry policy) live behind
//! them and are out of scope here. Every seam is object-safe and held
//! as `Arc<dyn …>` so test doubles can stand in.

use std::sync::Arc;

use async_trait::async_trait;
use greenroom_core::UserId;

use crate::error::{ConnectError, ServiceError};

/// Online/away presence tracker.
///
/// `init` must complete before any `set_online`/`set_away` call. Both
/// setters are idempotent on the tracker's side; the shell may call
/// them repeatedly across foreground/background transitions.
#[async_trait]
pub trait PresenceTracker: Send + Sync {
    async fn init(&self) -> Result<(), ServiceError>;
    fn set_online(&self);
    fn set_away(&self, reason: &str);
}

/// Typing-indicator tracker; fire-and-forget init.
pub trait TypingTracker: Send + Sync {
    fn init(&self) -> Result<(), ServiceError>;
}

/// Notification subscriber.
#[async_trait]
pub trait NotificationHub: Send + Sync {
    async fn init(&self) -> Result<(), ServiceError>;
}

/// Analytics event recorder; synchronous init.
pub trait AnalyticsRecorder: Send + Sync {
    fn init(&self) -> Result<(), ServiceError>;
}

/// Offline content cache.
#[async_trait]
pub trait OfflineCache: Send + Sync {
    async fn init(&self) -> Result<(), ServiceError>;
}

/// Generic status manager, keyed by user.
#[async_trait]
pub trait StatusManager: Send + Sync {
    async fn init(&self, user_id: &UserId) -> Result<(), ServiceError>;
}

/// Offline action queue; starts itself on construction.
pub trait OfflineQueue: Send + Sync {
    fn is_running(&self) -> bool;
}

/// Performance monitor; starts itself on construction.
pub trait PerfMonitor: Send + Sync {
    fn is_running(&self) -> bool;
}

/// Reconnect-capable realtime streaming channel.
///
/// `connect` may be called again after a drop; the channel's own
/// idle/lifecycle policy governs teardown.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    async fn connect(&self) -> Result<(), ConnectError>;
}

/// Host platform capability probe consulted once at launch.
pub trait HostCapabilities: Send + Sync {
    /// Whether the cloud runtime this app targets is available.
    fn cloud_available(&self) -> bool;
    /// Bind the cloud runtime to the configured environment.
    fn init_cloud(&self, env: &str);
}

/// Shared handles to every subsystem the shell drives.
#[derive(Clone)]
pub struct Services {
    pub host: Arc<dyn HostCapabilities>,
    pub presence: Arc<dyn PresenceTracker>,
    pub typing: Arc<dyn TypingTracker>,
    pub notifications: Arc<dyn NotificationHub>,
    pub analytics: Arc<dyn AnalyticsRecorder>,
    pub offline_cache: Arc<dyn OfflineCache>,
    pub status: Arc<dyn StatusManager>,
    pub offline_queue: Arc<dyn OfflineQueue>,
    pub perf: Arc<dyn PerfMonitor>,
    pub transport: Arc<dyn RealtimeTransport>,
}
