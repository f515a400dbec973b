//! Single-host operations and backup management.

use crate::config::Settings;
use crate::results::{OperationResult, SyncResult};
use crate::sync::{SyncEngine, SyncRequest, diff_fields, plan_entry};
use crate::Result;
use hostcfg_fs::{BackupManager, BackupRecord, PrunePolicy};
use hostcfg_hosts::{
    AdapterRegistry, HostConfiguration, HostContext, HostStrategy, McpAdapter, StrategyRegistry,
};
use hostcfg_meta::{FieldMap, HostType, McpServerConfig};
use std::collections::BTreeSet;
use std::path::Path;

/// Flags for a single-host write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub skip_backup: bool,
    /// Report what would change without writing.
    pub dry_run: bool,
}

/// Entry point for every operation on host configuration files.
pub struct HostConfigManager {
    adapters: AdapterRegistry,
    strategies: StrategyRegistry,
    backups: BackupManager,
}

impl HostConfigManager {
    /// Manager over the built-in hosts, resolving paths through `ctx`.
    pub fn new(ctx: HostContext) -> Self {
        Self {
            adapters: AdapterRegistry::with_builtins(),
            strategies: StrategyRegistry::with_builtins(&ctx),
            backups: ctx.backups,
        }
    }

    pub fn with_registries(
        adapters: AdapterRegistry,
        strategies: StrategyRegistry,
        backups: BackupManager,
    ) -> Self {
        Self {
            adapters,
            strategies,
            backups,
        }
    }

    pub fn from_settings(home: &Path, settings: &Settings) -> Self {
        let backups = BackupManager::new(settings.backup_root(home))
            .with_robustness(settings.robustness());
        Self::new(HostContext::new(home, backups))
    }

    /// Manager for the current user, with settings from
    /// `~/.hostcfg/config.toml`.
    pub fn for_current_user() -> Result<Self> {
        let home = dirs::home_dir().ok_or(hostcfg_hosts::Error::HomeDirNotFound)?;
        let settings = Settings::load_from_home(&home)?;
        Ok(Self::from_settings(&home, &settings))
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    fn resolve(&self, host_id: &str) -> Result<(HostType, &dyn McpAdapter, &dyn HostStrategy)> {
        let host: HostType = host_id.parse()?;
        Ok((
            host,
            self.adapters.for_host(host)?,
            self.strategies.for_host(host)?,
        ))
    }

    /// Add or replace one server on one host.
    ///
    /// Validation errors are returned before anything is written. Unless
    /// `dry_run` is set the host file is always rewritten, even when the
    /// entry is unchanged.
    pub fn configure(
        &self,
        server: &McpServerConfig,
        host_id: &str,
        options: WriteOptions,
    ) -> Result<OperationResult> {
        let (host, adapter, strategy) = self.resolve(host_id)?;

        let mut config = strategy.read_configuration();
        let planned = plan_entry(adapter, config.get(&server.name), server)?;
        let mut result = planned.result;
        config.insert(planned.entry);

        if options.dry_run {
            tracing::debug!(host = %host, server = %server.name, "Dry run, not writing");
            return Ok(result);
        }

        let receipt = strategy.write_configuration(&config, options.skip_backup)?;
        tracing::info!(host = %host, server = %server.name, path = %receipt.path.display(), "Configured server");
        result.backup = receipt.backup;
        Ok(result)
    }

    /// Remove one server, keeping every other entry and setting.
    ///
    /// Removing an absent server succeeds without touching the file.
    pub fn remove_server(
        &self,
        server_name: &str,
        host_id: &str,
        skip_backup: bool,
    ) -> Result<OperationResult> {
        let (host, _, strategy) = self.resolve(host_id)?;

        let mut config = strategy.read_configuration();
        let Some(removed) = config.remove(server_name) else {
            tracing::debug!(host = %host, server = server_name, "Server not configured");
            return Ok(OperationResult::succeeded(server_name, host.as_str(), Vec::new()));
        };

        let operations = diff_fields(&removed.to_field_map(), &FieldMap::new());
        let receipt = strategy.write_configuration(&config, skip_backup)?;
        tracing::info!(host = %host, server = server_name, "Removed server");

        let mut result = OperationResult::succeeded(server_name, host.as_str(), operations);
        result.backup = receipt.backup;
        Ok(result)
    }

    /// Servers currently configured on a host.
    pub fn list_servers(&self, host_id: &str) -> Result<HostConfiguration> {
        let (_, _, strategy) = self.resolve(host_id)?;
        Ok(strategy.read_configuration())
    }

    pub fn sync(&self, request: &SyncRequest) -> Result<SyncResult> {
        SyncEngine::new(&self.adapters, &self.strategies).run(request)
    }

    /// Backups of a host's file, newest first.
    pub fn list_backups(&self, host_id: &str) -> Result<Vec<BackupRecord>> {
        let host: HostType = host_id.parse()?;
        Ok(self.backups.list(host.as_str())?)
    }

    /// Put a backup back in place of the host's file.
    ///
    /// Returns `false` if no backup with that id exists.
    pub fn restore_backup(&self, host_id: &str, backup_id: &str) -> Result<bool> {
        let (host, _, strategy) = self.resolve(host_id)?;
        let target = strategy
            .config_path()
            .ok_or_else(|| hostcfg_hosts::Error::UnsupportedPlatform {
                host: host.as_str().to_string(),
            })?;

        match self.backups.restore(host.as_str(), backup_id, &target) {
            Ok(_) => Ok(true),
            Err(hostcfg_fs::Error::BackupNotFound { .. }) => {
                tracing::warn!(host = %host, backup = backup_id, "Backup not found");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn prune_backups(&self, host_id: &str, policy: PrunePolicy) -> Result<Vec<BackupRecord>> {
        let host: HostType = host_id.parse()?;
        Ok(self.backups.prune(host.as_str(), policy)?)
    }

    pub fn list_supported_hosts(&self) -> BTreeSet<String> {
        self.adapters.supported_hosts()
    }

    /// Whether the host looks installed. Unknown ids are never available.
    pub fn is_host_available(&self, host_id: &str) -> bool {
        self.resolve(host_id)
            .map(|(_, _, strategy)| strategy.is_available())
            .unwrap_or(false)
    }

    pub fn detect_available_hosts(&self) -> Vec<HostType> {
        self.strategies.available_hosts()
    }
}
