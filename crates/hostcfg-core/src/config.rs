//! User settings.
//!
//! Read from `~/.hostcfg/config.toml` (any extension [`ConfigStore`]
//! understands works when a path is given explicitly). Every key is
//! optional:
//!
//! ```toml
//! backup_dir = "/var/backups/hostcfg"
//! lock_timeout_ms = 5000
//! enable_fsync = true
//! ```

use crate::Result;
use hostcfg_fs::{ConfigStore, RobustnessConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory under the home directory holding settings and backups.
pub const APP_DIR: &str = ".hostcfg";
pub const SETTINGS_FILE: &str = "config.toml";
const BACKUPS_DIR: &str = "backups";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backup root. Defaults to `~/.hostcfg/backups`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    pub lock_timeout_ms: u64,
    pub enable_fsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let robustness = RobustnessConfig::default();
        Self {
            backup_dir: None,
            lock_timeout_ms: robustness.lock_timeout.as_millis() as u64,
            enable_fsync: robustness.enable_fsync,
        }
    }
}

impl Settings {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = ConfigStore::new().load_optional(path)?.unwrap_or_default();
        tracing::debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Load from `<home>/.hostcfg/config.toml`.
    pub fn load_from_home(home: &Path) -> Result<Self> {
        Self::load(&Self::default_path(home))
    }

    pub fn default_path(home: &Path) -> PathBuf {
        home.join(APP_DIR).join(SETTINGS_FILE)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::with_robustness(self.robustness()).save(path, self)?;
        Ok(())
    }

    pub fn robustness(&self) -> RobustnessConfig {
        RobustnessConfig {
            lock_timeout: Duration::from_millis(self.lock_timeout_ms),
            enable_fsync: self.enable_fsync,
        }
    }

    /// Configured backup root, or `<home>/.hostcfg/backups`.
    pub fn backup_root(&self, home: &Path) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => dir.clone(),
            None => home.join(APP_DIR).join(BACKUPS_DIR),
        }
    }
}
