//! Domain types for the Greenroom shell.
//!
//! All types are serializable/deserializable via serde; the session
//! store persists them as JSON values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Application-level lifecycle phase.
///
/// `Launching → Foreground` on first show, then `Foreground ⇄ Background`
/// on show/hide events. Process exit ends the lifecycle implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    #[default]
    Launching,
    Foreground,
    Background,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::Launching => write!(f, "launching"),
            LifecyclePhase::Foreground => write!(f, "foreground"),
            LifecyclePhase::Background => write!(f, "background"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// An authenticated session as observed in the store.
///
/// Exists iff both the `userId` and `userInfo` keys are present.
/// Written by the external login flow; read-only to the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub user_info: Value,
}

/// Shared state for the global busy indicator.
///
/// Last writer wins; driven by UI-thread-only callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingState {
    pub visible: bool,
    pub text: String,
    pub mask: bool,
}

/// Default loading text shown when callers do not supply one.
pub const DEFAULT_LOADING_TEXT: &str = "loading";

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            visible: false,
            text: DEFAULT_LOADING_TEXT.to_string(),
            mask: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_display() {
        assert_eq!(UserId::from("u1").to_string(), "u1");
    }

    #[test]
    fn user_id_equality() {
        let a = UserId::from("x");
        let b = UserId::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn lifecycle_starts_launching() {
        assert_eq!(LifecyclePhase::default(), LifecyclePhase::Launching);
        assert_eq!(LifecyclePhase::Foreground.to_string(), "foreground");
    }

    #[test]
    fn loading_state_defaults() {
        let state = LoadingState::default();
        assert!(!state.visible);
        assert_eq!(state.text, "loading");
        assert!(state.mask);
    }

    #[test]
    fn session_serde_roundtrip() {
        let session = Session {
            user_id: UserId::from("u1"),
            user_info: json!({"nickname": "ada"}),
        };
        let encoded = serde_json::to_string(&session).expect("serialize");
        let decoded: Session = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(session, decoded);
    }
}
