//! Sync engine
//!
//! For each target host, in caller order: read the host file once, merge
//! every selected server into it, and write it back once if anything
//! changed. A failure on one host never undoes another host's write.

use super::diff::plan_entry;
use super::selection::{SyncRequest, SyncSource};
use crate::Result;
use crate::results::{OperationResult, SyncResult};
use hostcfg_hosts::{AdapterRegistry, HostStrategy, McpAdapter, StrategyRegistry};
use hostcfg_meta::{CapabilityRegistry, HostType, McpServerConfig};

/// Runs [`SyncRequest`]s against a pair of registries.
pub struct SyncEngine<'a> {
    adapters: &'a AdapterRegistry,
    strategies: &'a StrategyRegistry,
}

impl<'a> SyncEngine<'a> {
    pub fn new(adapters: &'a AdapterRegistry, strategies: &'a StrategyRegistry) -> Self {
        Self {
            adapters,
            strategies,
        }
    }

    /// Run a sync.
    ///
    /// Fails only when the source cannot be resolved (unknown source host);
    /// everything after that is reported per (server, host) pair.
    pub fn run(&self, request: &SyncRequest) -> Result<SyncResult> {
        let (source_host, servers) = self.resolve_source(request)?;
        tracing::info!(
            source = request.source.label(),
            servers = servers.len(),
            targets = request.targets.len(),
            dry_run = request.dry_run,
            "Starting sync"
        );

        let mut results = Vec::with_capacity(servers.len() * request.targets.len());
        for target in &request.targets {
            results.extend(self.sync_target(target, source_host, &servers, request));
        }

        let sync = SyncResult {
            source: request.source.label().to_string(),
            dry_run: request.dry_run,
            results,
        };
        tracing::info!(
            failed = sync.failures().count(),
            updated_fields = sync.updated_field_count(),
            "Sync finished"
        );
        Ok(sync)
    }

    fn resolve_source(
        &self,
        request: &SyncRequest,
    ) -> Result<(Option<HostType>, Vec<McpServerConfig>)> {
        let (source_host, servers) = match &request.source {
            SyncSource::Environment { servers, .. } => (None, servers.clone()),
            SyncSource::Host(id) => {
                let host: HostType = id.parse()?;
                let strategy = self.strategies.for_host(host)?;
                let servers: Vec<McpServerConfig> =
                    strategy.read_configuration().into_iter().collect();
                (Some(host), servers)
            }
        };

        let selected = servers
            .into_iter()
            .filter(|s| request.selection.matches(&s.name))
            .collect();
        Ok((source_host, selected))
    }

    fn sync_target(
        &self,
        target_id: &str,
        source_host: Option<HostType>,
        servers: &[McpServerConfig],
        request: &SyncRequest,
    ) -> Vec<OperationResult> {
        let resolved = target_id.parse::<HostType>().and_then(|host| {
            Ok((
                host,
                self.adapters.for_host(host)?,
                self.strategies.for_host(host)?,
            ))
        });
        let (host, adapter, strategy) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(host = target_id, error = %e, "Skipping unknown target");
                return servers
                    .iter()
                    .map(|s| OperationResult::failed(&s.name, target_id, &e))
                    .collect();
            }
        };

        let (mut results, config, changed) =
            merge_servers(adapter, strategy, host, source_host, servers);

        if !changed || request.dry_run {
            tracing::debug!(host = %host, changed, dry_run = request.dry_run, "No write needed");
            return results;
        }

        match strategy.write_configuration(&config, request.skip_backup) {
            Ok(receipt) => {
                tracing::info!(host = %host, path = %receipt.path.display(), "Synced host");
                for result in results.iter_mut().filter(|r| r.success) {
                    result.backup = receipt.backup.clone();
                }
            }
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Host write failed");
                for result in results.iter_mut().filter(|r| r.success) {
                    result.fail(&e);
                }
            }
        }
        results
    }
}

/// Merge every server into the target's current configuration.
fn merge_servers(
    adapter: &dyn McpAdapter,
    strategy: &dyn HostStrategy,
    host: HostType,
    source_host: Option<HostType>,
    servers: &[McpServerConfig],
) -> (Vec<OperationResult>, hostcfg_hosts::HostConfiguration, bool) {
    let capabilities = CapabilityRegistry::global();
    let mut config = strategy.read_configuration();
    let mut results = Vec::with_capacity(servers.len());
    let mut changed = false;

    for server in servers {
        let server = match source_host {
            Some(source) => capabilities.remap_for_target(source, host, server),
            None => server.clone(),
        };

        match plan_entry(adapter, config.get(&server.name), &server) {
            Ok(planned) => {
                if planned.changed() {
                    changed = true;
                    config.insert(planned.entry);
                }
                results.push(planned.result);
            }
            Err(e) => {
                tracing::debug!(host = %host, server = %server.name, error = %e, "Server rejected");
                results.push(OperationResult::failed(&server.name, host.as_str(), e));
            }
        }
    }
    (results, config, changed)
}
