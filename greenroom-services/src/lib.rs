//! Subsystem seams consumed by the Greenroom shell.
//!
//! - [`seams`] — the trait interfaces and the [`Services`] bundle
//! - [`error`] — [`ServiceError`] / [`ConnectError`]
//! - [`testing`] — recording fakes for orchestration tests

pub mod error;
pub mod seams;
pub mod testing;

pub use error::{ConnectError, ServiceError};
pub use seams::{
    AnalyticsRecorder, HostCapabilities, NotificationHub, OfflineCache, OfflineQueue, PerfMonitor,
    PresenceTracker, RealtimeTransport, Services, StatusManager, TypingTracker,
};
