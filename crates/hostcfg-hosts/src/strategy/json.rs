//! Strategy shared by every JSON host.

use super::{
    HostConfiguration, HostContext, HostLocation, HostStrategy, WriteReceipt, guarded_write,
    malformed_base, read_error, require_path, write_error,
};
use crate::Result;
use hostcfg_fs::{BackupRecord, io};
use hostcfg_meta::{CapabilityRegistry, FieldMap, HostType, McpServerConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Static description of one JSON host's file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonHostSpec {
    pub host: HostType,
    /// Top-level key holding the servers object.
    pub root_key: &'static str,
    pub location: HostLocation,
    /// Directory whose existence means the host is installed. Defaults to
    /// the config file's parent directory.
    pub marker: Option<HostLocation>,
    /// Re-read the file after writing and check every server landed.
    pub verify_after_write: bool,
}

/// Reads and writes `{ "<root_key>": { "<name>": {...} }, ...other keys }`.
#[derive(Debug, Clone)]
pub struct JsonHostStrategy {
    spec: JsonHostSpec,
    ctx: HostContext,
}

impl JsonHostStrategy {
    pub fn new(spec: JsonHostSpec, ctx: HostContext) -> Self {
        Self { spec, ctx }
    }

    pub fn spec(&self) -> &JsonHostSpec {
        &self.spec
    }

    fn parse_document(&self, path: &Path, content: &str) -> Result<FieldMap> {
        if content.trim().is_empty() {
            return Ok(FieldMap::new());
        }
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(doc)) => Ok(doc),
            Ok(_) => Err(read_error(self.host(), path, "top level is not a JSON object")),
            Err(e) => Err(read_error(self.host(), path, e.to_string())),
        }
    }

    fn servers_from_document(&self, path: &Path, doc: &FieldMap) -> Result<HostConfiguration> {
        let caps = CapabilityRegistry::global().for_host(self.host());
        let Some(section) = doc.get(self.spec.root_key) else {
            return Ok(HostConfiguration::new());
        };
        let Some(section) = section.as_object() else {
            return Err(read_error(
                self.host(),
                path,
                format!("'{}' is not an object", self.spec.root_key),
            ));
        };

        let mut config = HostConfiguration::new();
        for (name, entry) in section {
            match entry {
                Value::Object(fields) => {
                    let unified = caps.from_native(fields.clone());
                    config.insert(McpServerConfig::from_field_map_lossless(name, unified));
                }
                other => {
                    tracing::debug!(host = %self.host(), server = %name, "Keeping non-object server entry as is");
                    config.insert_passthrough(name, other.clone());
                }
            }
        }
        Ok(config)
    }

    fn servers_to_value(&self, config: &HostConfiguration) -> Value {
        let caps = CapabilityRegistry::global().for_host(self.host());
        let servers: FieldMap = config
            .native_entries(|server| Value::Object(caps.to_native(server.to_field_map())))
            .into_iter()
            .collect();
        Value::Object(servers)
    }

    /// Put the file back the way it was before an unverified write: from the
    /// backup, else from the content read before writing, else by removing
    /// the file the write created.
    fn undo_write(
        &self,
        path: &Path,
        original: Option<&str>,
        backup: Option<&BackupRecord>,
    ) -> Result<()> {
        match (backup, original) {
            (Some(record), _) => {
                self.ctx
                    .backups
                    .restore(self.host().as_str(), &record.id, path)?;
            }
            (None, Some(content)) => {
                io::write_atomic(path, content.as_bytes(), self.ctx.backups.robustness())?;
            }
            (None, None) => {
                if let Err(e) = std::fs::remove_file(path)
                    && e.kind() != std::io::ErrorKind::NotFound
                {
                    return Err(hostcfg_fs::Error::io(path, e).into());
                }
            }
        }
        tracing::info!(host = %self.host(), path = %path.display(), "Rolled back unverified write");
        Ok(())
    }

    fn verify(&self, path: &Path, config: &HostConfiguration) -> Result<()> {
        let written = self.try_read_configuration()?;
        if let Some(missing) = config.names().find(|name| !written.contains(name)) {
            return Err(write_error(
                self.host(),
                path,
                format!("verification failed: server '{missing}' not found after write"),
            ));
        }
        Ok(())
    }
}

impl HostStrategy for JsonHostStrategy {
    fn host(&self) -> HostType {
        self.spec.host
    }

    fn config_path(&self) -> Option<PathBuf> {
        self.ctx.resolve(&self.spec.location)
    }

    fn config_key(&self) -> &'static str {
        self.spec.root_key
    }

    fn is_available(&self) -> bool {
        let marker = match &self.spec.marker {
            Some(location) => self.ctx.resolve(location),
            None => self
                .config_path()
                .and_then(|p| p.parent().map(Path::to_path_buf)),
        };
        marker.is_some_and(|dir| dir.is_dir())
    }

    fn try_read_configuration(&self) -> Result<HostConfiguration> {
        let path = require_path(self.host(), self.config_path())?;
        let Some(content) = io::read_text_optional(&path)? else {
            return Ok(HostConfiguration::new());
        };
        let doc = self.parse_document(&path, &content)?;
        self.servers_from_document(&path, &doc)
    }

    fn write_configuration(
        &self,
        config: &HostConfiguration,
        skip_backup: bool,
    ) -> Result<WriteReceipt> {
        let host = self.host();
        let path = require_path(host, self.config_path())?;

        let original = io::read_text_optional(&path)?;
        let mut doc = match original.as_deref().map(|c| self.parse_document(&path, c)) {
            None => FieldMap::new(),
            Some(Ok(doc)) => doc,
            Some(Err(e)) => {
                malformed_base(host, &path, &e.to_string(), skip_backup)?;
                FieldMap::new()
            }
        };

        doc.insert(self.spec.root_key.to_string(), self.servers_to_value(config));
        let mut content = serde_json::to_string_pretty(&Value::Object(doc))?;
        content.push('\n');

        let backup = guarded_write(
            &self.ctx,
            host,
            &path,
            original.as_deref(),
            &content,
            skip_backup,
        )?;

        if self.spec.verify_after_write
            && let Err(e) = self.verify(&path, config)
        {
            if let Err(undo_err) = self.undo_write(&path, original.as_deref(), backup.as_ref()) {
                tracing::warn!(host = %host, error = %undo_err, "Rollback after failed verification failed");
            }
            return Err(e);
        }

        tracing::debug!(host = %host, servers = config.len(), path = %path.display(), "Wrote host configuration");
        Ok(WriteReceipt { path, backup })
    }
}
