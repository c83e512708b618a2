//! Global busy indicator. Last writer wins; driven by UI-thread-only
//! callers, so there is no concurrency hazard beyond the watch channel.

use greenroom_core::types::DEFAULT_LOADING_TEXT;
use greenroom_core::LoadingState;
use tokio::sync::watch;

pub struct LoadingOverlay {
    state_tx: watch::Sender<LoadingState>,
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        let (state_tx, _) = watch::channel(LoadingState::default());
        Self { state_tx }
    }
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the indicator. `text` defaults to `"loading"`; `mask`
    /// defaults to `true` unless explicitly `false`.
    pub fn show(&self, text: Option<&str>, mask: Option<bool>) {
        self.state_tx.send_replace(LoadingState {
            visible: true,
            text: text.unwrap_or(DEFAULT_LOADING_TEXT).to_string(),
            mask: mask.unwrap_or(true),
        });
    }

    pub fn hide(&self) {
        self.state_tx.send_modify(|state| state.visible = false);
    }

    pub fn state(&self) -> LoadingState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to indicator changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadingState> {
        self.state_tx.subscribe()
    }
}
