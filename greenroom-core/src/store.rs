//! Persisted key-value session store.
//!
//! # Storage layout
//!
//! ```text
//! ~/.greenroom/
//!   state.json   (flat key → JSON value map — mode 0600)
//!   config.yaml  (shell configuration, see `config`)
//! ```
//!
//! # API pattern
//!
//! Constructors come in two forms:
//! - `open_at(home: &Path)` — explicit home; used in tests with `TempDir`
//! - `open()` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.
//!
//! The store is consumed, not owned, by the shell: the external login
//! flow writes the `userId`/`userInfo` keys, the shell only observes
//! them (plus its own diagnostic `logs` list).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{io_err, StoreError};
use crate::types::{Session, UserId};

/// Key holding the signed-in user's identifier.
pub const KEY_USER_ID: &str = "userId";
/// Key holding the signed-in user's profile object.
pub const KEY_USER_INFO: &str = "userInfo";
/// Key holding the diagnostic launch-log list (newest first).
pub const KEY_LOGS: &str = "logs";

/// `<home>/.greenroom/`
pub fn greenroom_root(home: &Path) -> PathBuf {
    home.join(".greenroom")
}

/// `<home>/.greenroom/state.json` — pure, no I/O.
pub fn state_path_at(home: &Path) -> PathBuf {
    greenroom_root(home).join("state.json")
}

/// Key-value persisted storage as consumed by the shell.
///
/// Reads are synchronous and infallible (backed by an in-memory view);
/// writes persist and may fail. Typed helpers interpret the well-known
/// session keys.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Prepend `entry` to the persisted `logs` list (newest first).
    fn append_log(&self, entry: Value) -> Result<(), StoreError> {
        let mut logs = match self.get(KEY_LOGS) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        logs.insert(0, entry);
        self.set(KEY_LOGS, Value::Array(logs))
    }

    /// The signed-in user's identifier, if the `userId` key is present
    /// and holds a string.
    fn user_id(&self) -> Option<UserId> {
        match self.get(KEY_USER_ID) {
            Some(Value::String(id)) if !id.is_empty() => Some(UserId(id)),
            _ => None,
        }
    }

    /// The signed-in user's profile object, if present.
    fn user_info(&self) -> Option<Value> {
        match self.get(KEY_USER_INFO) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// A session exists iff both `userId` and `userInfo` are present.
    fn session(&self) -> Option<Session> {
        let user_id = self.user_id()?;
        let user_info = self.user_info()?;
        Some(Session { user_id, user_info })
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

type StateMap = BTreeMap<String, Value>;

/// JSON-file-backed [`SessionStore`].
///
/// The whole state file is loaded at open and kept as the in-memory
/// view; every write persists the full map atomically (tmp + rename).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: RwLock<StateMap>,
}

impl FileStore {
    /// Open (or create) the store under `<home>/.greenroom/state.json`.
    pub fn open_at(home: &Path) -> Result<Self, StoreError> {
        let root = greenroom_root(home);
        if !root.exists() {
            std::fs::create_dir_all(&root).map_err(|e| io_err(&root, e))?;
            set_dir_permissions(&root)?;
        }
        let path = state_path_at(home);
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            serde_json::from_str(&contents).map_err(|e| StoreError::Json {
                path: path.clone(),
                source: e,
            })?
        } else {
            StateMap::new()
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// `open_at` convenience wrapper (uses `dirs::home_dir()`).
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Self::open_at(&home)
    }

    /// Path of the backing state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &StateMap) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(state).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded.as_bytes()).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.insert(key.to_owned(), value);
        self.persist(&state)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if state.remove(key).is_some() {
            self.persist(&state)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Purely in-memory [`SessionStore`] for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<StateMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store; handy for seeding session keys in tests.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            state: RwLock::new(entries.into_iter().collect()),
        }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.remove(key);
        Ok(())
    }
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
