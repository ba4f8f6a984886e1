//! Persisted user settings: credential, model and endpoint.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_ENDPOINT, DEFAULT_HISTORY_LIMIT};
use crate::error::{RedrawError, Result};
use crate::inpaint::request::mask_secret;
use crate::params::{ModelChoice, RedrawMode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub model: ModelChoice,
    pub endpoint: String,
    /// Request timeout for the remote call, in seconds.
    pub timeout_secs: u64,
    /// Mode used when a page is loaded without an explicit choice.
    pub default_mode: RedrawMode,
    /// Undo snapshots kept per editing mode.
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: ModelChoice::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
            default_mode: RedrawMode::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| RedrawError::Settings(format!("{}: {e}", path.display())))
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = toml::to_string_pretty(self)
            .map_err(|e| RedrawError::Settings(e.to_string()))?;
        fs::write(path, text)?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The API key with everything but its ends hidden.
    pub fn masked_key(&self) -> String {
        mask_secret(self.api_key.trim())
    }
}
