//! Shell configuration, loaded from `<home>/.greenroom/config.yaml`.
//!
//! A missing file yields [`ShellConfig::default`]; a malformed file is
//! a [`StoreError::Parse`] with path and line context.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, StoreError};
use crate::store::greenroom_root;

/// Default human-readable reason reported when the app backgrounds.
pub const DEFAULT_AWAY_REASON: &str = "stepped away";

/// Configuration consumed by the shell at launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Cloud environment identifier passed to the host capability probe.
    pub cloud_env: String,
    /// Reason handed to the presence tracker on background.
    pub away_reason: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            cloud_env: "prod".to_string(),
            away_reason: DEFAULT_AWAY_REASON.to_string(),
        }
    }
}

/// `<home>/.greenroom/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    greenroom_root(home).join("config.yaml")
}

impl ShellConfig {
    /// Load config from `<home>/.greenroom/config.yaml`; defaults if absent.
    pub fn load_at(home: &Path) -> Result<Self, StoreError> {
        let path = config_path_at(home);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse { path, source: e })
    }

    /// `load_at` convenience wrapper (uses `dirs::home_dir()`).
    pub fn load() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Self::load_at(&home)
    }
}
