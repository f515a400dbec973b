//! Strategies: locate, read and safely rewrite one host's config file.
//!
//! JSON hosts share [`JsonHostStrategy`], parametrized by a [`JsonHostSpec`]
//! from [`specs`]. Codex stores TOML and has its own [`TomlHostStrategy`].
//! Every write goes through [`guarded_write`]: re-read, back up, stage,
//! check the file did not change underneath us, then rename.

mod codex;
mod context;
mod json;
mod registry;
pub mod specs;

pub use codex::TomlHostStrategy;
pub use context::{HostContext, HostLocation, Platform};
pub use json::{JsonHostSpec, JsonHostStrategy};
pub use registry::StrategyRegistry;

use crate::{Error, Result};
use hostcfg_fs::{BackupRecord, ExpectedState, WriteRequest};
use hostcfg_meta::{HostType, McpServerConfig};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Every server entry of one host, keyed by server name.
///
/// Entries that are not objects (or tables) cannot become records. They are
/// kept verbatim as passthrough values and written back unchanged unless a
/// record of the same name replaces them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfiguration {
    servers: BTreeMap<String, McpServerConfig>,
    passthrough: BTreeMap<String, JsonValue>,
}

impl HostConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&McpServerConfig> {
        self.servers.get(name)
    }

    /// Insert or replace the entry named `config.name`.
    pub fn insert(&mut self, config: McpServerConfig) -> Option<McpServerConfig> {
        self.servers.insert(config.name.clone(), config)
    }

    /// Remove the named entry, passthrough values included.
    pub fn remove(&mut self, name: &str) -> Option<McpServerConfig> {
        self.passthrough.remove(name);
        self.servers.remove(name)
    }

    /// Keep an entry that is not a server record.
    pub fn insert_passthrough(&mut self, name: impl Into<String>, value: JsonValue) {
        self.passthrough.insert(name.into(), value);
    }

    pub fn passthrough(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.passthrough.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every entry to write, by name: records in native form via
    /// `to_native`, then passthrough values no record shadows.
    pub(crate) fn native_entries<F>(&self, mut to_native: F) -> BTreeMap<String, JsonValue>
    where
        F: FnMut(&McpServerConfig) -> JsonValue,
    {
        let mut entries: BTreeMap<String, JsonValue> = self
            .passthrough
            .iter()
            .filter(|(name, _)| !self.servers.contains_key(*name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for server in self.servers.values() {
            entries.insert(server.name.clone(), to_native(server));
        }
        entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &McpServerConfig> {
        self.servers.values()
    }
}

impl FromIterator<McpServerConfig> for HostConfiguration {
    fn from_iter<I: IntoIterator<Item = McpServerConfig>>(iter: I) -> Self {
        let mut config = Self::new();
        for server in iter {
            config.insert(server);
        }
        config
    }
}

impl IntoIterator for HostConfiguration {
    type Item = McpServerConfig;
    type IntoIter = std::collections::btree_map::IntoValues<String, McpServerConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.servers.into_values()
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub path: PathBuf,
    pub backup: Option<BackupRecord>,
}

/// Reads and writes one host's configuration file.
pub trait HostStrategy: Send + Sync {
    fn host(&self) -> HostType;

    /// Absolute path of the config file, `None` on unsupported platforms.
    fn config_path(&self) -> Option<PathBuf>;

    /// Root key (JSON) or table (TOML) holding the server entries.
    fn config_key(&self) -> &'static str;

    /// Whether the host looks installed. Says nothing about it running.
    fn is_available(&self) -> bool;

    /// Parse the current file. A missing file is an empty configuration;
    /// a malformed one is [`Error::ConfigurationRead`].
    fn try_read_configuration(&self) -> Result<HostConfiguration>;

    /// Replace the servers section with `config`, keeping everything else.
    fn write_configuration(
        &self,
        config: &HostConfiguration,
        skip_backup: bool,
    ) -> Result<WriteReceipt>;

    /// Like [`HostStrategy::try_read_configuration`] but never fails:
    /// unreadable files degrade to an empty configuration with a warning.
    fn read_configuration(&self) -> HostConfiguration {
        match self.try_read_configuration() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(host = %self.host(), error = %e, "Treating configuration as empty");
                HostConfiguration::new()
            }
        }
    }
}

pub(crate) fn require_path(host: HostType, path: Option<PathBuf>) -> Result<PathBuf> {
    path.ok_or_else(|| Error::UnsupportedPlatform {
        host: host.as_str().to_string(),
    })
}

pub(crate) fn read_error(host: HostType, path: &Path, message: impl Into<String>) -> Error {
    Error::ConfigurationRead {
        host: host.as_str().to_string(),
        path: path.to_path_buf(),
        message: message.into(),
    }
}

pub(crate) fn write_error(host: HostType, path: &Path, message: impl Into<String>) -> Error {
    Error::ConfigurationWrite {
        host: host.as_str().to_string(),
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Decide what to do with an existing file that failed to parse.
///
/// With a backup the write may proceed from an empty document since the
/// original survives in the backup. Without one the write is refused.
pub(crate) fn malformed_base(
    host: HostType,
    path: &Path,
    parse_error: &str,
    skip_backup: bool,
) -> Result<()> {
    if skip_backup {
        return Err(write_error(
            host,
            path,
            format!("existing file is malformed ({parse_error}) and backup was skipped"),
        ));
    }
    tracing::warn!(
        host = %host,
        path = %path.display(),
        error = parse_error,
        "Existing configuration is malformed; rewriting from an empty document"
    );
    Ok(())
}

/// Back up and atomically replace `path` with `content`, failing if the
/// file no longer matches `original` (the content the merge was based on).
pub(crate) fn guarded_write(
    ctx: &HostContext,
    host: HostType,
    path: &Path,
    original: Option<&str>,
    content: &str,
    skip_backup: bool,
) -> Result<Option<BackupRecord>> {
    let request = WriteRequest {
        host: host.as_str(),
        target: path,
        content: content.as_bytes(),
        skip_backup,
        expected: ExpectedState::observed(original),
    };

    ctx.backups
        .write_with_backup(&request)
        .map_err(|e| match e {
            hostcfg_fs::Error::BackupFailed { .. } => Error::Backup {
                host: host.as_str().to_string(),
                source: e,
            },
            other => write_error(host, path, other.to_string()),
        })
}
