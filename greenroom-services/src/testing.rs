//! Recording test doubles for the subsystem seams.
//!
//! Each fake counts invocations, captures arguments, and can be armed
//! to fail. [`RecordingSet`] bundles one of each and hands out a
//! [`Services`] view for wiring into the shell under test.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use greenroom_core::UserId;

use crate::error::{ConnectError, ServiceError};
use crate::seams::{
    AnalyticsRecorder, HostCapabilities, NotificationHub, OfflineCache, OfflineQueue, PerfMonitor,
    PresenceTracker, RealtimeTransport, Services, StatusManager, TypingTracker,
};

fn poisoned<T>(result: Result<T, std::sync::PoisonError<T>>) -> T {
    result.unwrap_or_else(|e| e.into_inner())
}

#[derive(Default)]
pub struct RecordingHost {
    pub cloud_missing: AtomicBool,
    pub init_cloud_envs: Mutex<Vec<String>>,
}

impl HostCapabilities for RecordingHost {
    fn cloud_available(&self) -> bool {
        !self.cloud_missing.load(Ordering::SeqCst)
    }

    fn init_cloud(&self, env: &str) {
        poisoned(self.init_cloud_envs.lock()).push(env.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingPresence {
    pub init_calls: AtomicUsize,
    pub online_calls: AtomicUsize,
    pub away_reasons: Mutex<Vec<String>>,
    pub fail_init: AtomicBool,
}

#[async_trait]
impl PresenceTracker for RecordingPresence {
    async fn init(&self) -> Result<(), ServiceError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ServiceError::init("presence", "armed to fail"));
        }
        Ok(())
    }

    fn set_online(&self) {
        self.online_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn set_away(&self, reason: &str) {
        poisoned(self.away_reasons.lock()).push(reason.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingTyping {
    pub init_calls: AtomicUsize,
    pub fail_init: AtomicBool,
}

impl TypingTracker for RecordingTyping {
    fn init(&self) -> Result<(), ServiceError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ServiceError::init("typing", "armed to fail"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifications {
    pub init_calls: AtomicUsize,
    pub fail_init: AtomicBool,
}

#[async_trait]
impl NotificationHub for RecordingNotifications {
    async fn init(&self) -> Result<(), ServiceError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ServiceError::init("notifications", "armed to fail"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    pub init_calls: AtomicUsize,
    pub fail_init: AtomicBool,
}

impl AnalyticsRecorder for RecordingAnalytics {
    fn init(&self) -> Result<(), ServiceError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ServiceError::init("analytics", "armed to fail"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOfflineCache {
    pub init_calls: AtomicUsize,
    pub fail_init: AtomicBool,
}

#[async_trait]
impl OfflineCache for RecordingOfflineCache {
    async fn init(&self) -> Result<(), ServiceError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ServiceError::init("offline_cache", "armed to fail"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingStatus {
    pub init_user_ids: Mutex<Vec<UserId>>,
    pub fail_init: AtomicBool,
}

#[async_trait]
impl StatusManager for RecordingStatus {
    async fn init(&self, user_id: &UserId) -> Result<(), ServiceError> {
        poisoned(self.init_user_ids.lock()).push(user_id.clone());
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ServiceError::init("status", "armed to fail"));
        }
        Ok(())
    }
}

/// Auto-started fakes for the two construction-time subsystems.
#[derive(Default)]
pub struct AutoStarted;

impl OfflineQueue for AutoStarted {
    fn is_running(&self) -> bool {
        true
    }
}

impl PerfMonitor for AutoStarted {
    fn is_running(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    pub connect_calls: AtomicUsize,
    pub fail_connect: AtomicBool,
}

#[async_trait]
impl RealtimeTransport for RecordingTransport {
    async fn connect(&self) -> Result<(), ConnectError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ConnectError::Unreachable("armed to fail".to_string()));
        }
        Ok(())
    }
}

/// One recording fake per seam, plus a [`Services`] view over them.
#[derive(Default)]
pub struct RecordingSet {
    pub host: Arc<RecordingHost>,
    pub presence: Arc<RecordingPresence>,
    pub typing: Arc<RecordingTyping>,
    pub notifications: Arc<RecordingNotifications>,
    pub analytics: Arc<RecordingAnalytics>,
    pub offline_cache: Arc<RecordingOfflineCache>,
    pub status: Arc<RecordingStatus>,
    pub transport: Arc<RecordingTransport>,
}

impl RecordingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> Services {
        Services {
            host: self.host.clone(),
            presence: self.presence.clone(),
            typing: self.typing.clone(),
            notifications: self.notifications.clone(),
            analytics: self.analytics.clone(),
            offline_cache: self.offline_cache.clone(),
            status: self.status.clone(),
            offline_queue: Arc::new(AutoStarted),
            perf: Arc::new(AutoStarted),
            transport: self.transport.clone(),
        }
    }

    /// Total init invocations across the five independent subsystems.
    pub fn independent_init_calls(&self) -> usize {
        self.presence.init_calls.load(Ordering::SeqCst)
            + self.typing.init_calls.load(Ordering::SeqCst)
            + self.notifications.init_calls.load(Ordering::SeqCst)
            + self.analytics.init_calls.load(Ordering::SeqCst)
            + self.offline_cache.init_calls.load(Ordering::SeqCst)
    }
}
