//! Where host files live.

use crate::{Error, Result};
use hostcfg_fs::{BackupManager, RobustnessConfig};
use std::path::{Path, PathBuf};

/// Operating system family used for path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// A path relative to the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLocation {
    /// Same relative path on every platform.
    HomeRelative(&'static str),

    /// Different relative path per platform; unsupported elsewhere.
    OsSpecific {
        macos: &'static str,
        linux: &'static str,
        windows: &'static str,
    },
}

impl HostLocation {
    pub fn resolve(&self, platform: Platform) -> Option<&'static str> {
        match (self, platform) {
            (HostLocation::HomeRelative(p), _) => Some(*p),
            (HostLocation::OsSpecific { macos, .. }, Platform::MacOs) => Some(*macos),
            (HostLocation::OsSpecific { linux, .. }, Platform::Linux) => Some(*linux),
            (HostLocation::OsSpecific { windows, .. }, Platform::Windows) => Some(*windows),
            (HostLocation::OsSpecific { .. }, Platform::Other) => None,
        }
    }
}

/// Everything a strategy needs from its surroundings.
///
/// Injected rather than read from globals so tests can point every host at
/// a temporary home directory.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub home: PathBuf,
    pub platform: Platform,
    pub backups: BackupManager,
}

impl HostContext {
    pub fn new(home: impl Into<PathBuf>, backups: BackupManager) -> Self {
        Self {
            home: home.into(),
            platform: Platform::current(),
            backups,
        }
    }

    /// Context for the current user with backups under `backup_root`.
    pub fn for_current_user(
        backup_root: impl Into<PathBuf>,
        robustness: RobustnessConfig,
    ) -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        Ok(Self::new(
            home,
            BackupManager::new(backup_root).with_robustness(robustness),
        ))
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn resolve(&self, location: &HostLocation) -> Option<PathBuf> {
        location
            .resolve(self.platform)
            .map(|rel| self.home.join(rel))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}
