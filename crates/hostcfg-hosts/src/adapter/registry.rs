//! Adapter lookup by host id.

use super::{
    ClaudeAdapter, CodexAdapter, CursorAdapter, GeminiAdapter, KiroAdapter, LmStudioAdapter,
    McpAdapter, VsCodeAdapter,
};
use hostcfg_meta::{Error, HostType, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Adapters keyed by host.
///
/// Populated by an explicit [`AdapterRegistry::register`] call per adapter;
/// [`AdapterRegistry::with_builtins`] registers every built-in host in a
/// fixed order.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<HostType, Box<dyn McpAdapter>>,
}

impl AdapterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let builtins: Vec<Box<dyn McpAdapter>> = vec![
            Box::new(ClaudeAdapter::desktop()),
            Box::new(ClaudeAdapter::code()),
            Box::new(VsCodeAdapter),
            Box::new(CursorAdapter),
            Box::new(LmStudioAdapter),
            Box::new(GeminiAdapter),
            Box::new(KiroAdapter),
            Box::new(CodexAdapter),
        ];

        let mut registry = Self::new();
        for adapter in builtins {
            registry.register(adapter);
        }
        registry
    }

    /// Register an adapter, replacing any previous one for the same host.
    pub fn register(&mut self, adapter: Box<dyn McpAdapter>) {
        self.adapters.insert(adapter.host(), adapter);
    }

    pub fn for_host(&self, host: HostType) -> Result<&dyn McpAdapter> {
        self.adapters
            .get(&host)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownHost {
                host: host.as_str().to_string(),
            })
    }

    /// Adapter by string id.
    pub fn get(&self, host_id: &str) -> Result<&dyn McpAdapter> {
        self.for_host(host_id.parse()?)
    }

    pub fn supported_hosts(&self) -> BTreeSet<String> {
        self.adapters.keys().map(|h| h.as_str().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
