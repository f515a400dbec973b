//! Strategy lookup by host id.

use super::specs::json_host_spec;
use super::{HostContext, HostStrategy, JsonHostStrategy, TomlHostStrategy};
use hostcfg_meta::{Error, HostType, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Strategies keyed by host, all sharing one [`HostContext`].
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<HostType, Box<dyn HostStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy for every built-in host, in [`HostType::ALL`]
    /// order.
    pub fn with_builtins(ctx: &HostContext) -> Self {
        let mut registry = Self::new();
        for host in HostType::ALL {
            let strategy: Box<dyn HostStrategy> = match json_host_spec(host) {
                Some(spec) => Box::new(JsonHostStrategy::new(spec, ctx.clone())),
                None => Box::new(TomlHostStrategy::new(ctx.clone())),
            };
            registry.register(strategy);
        }
        registry
    }

    pub fn register(&mut self, strategy: Box<dyn HostStrategy>) {
        self.strategies.insert(strategy.host(), strategy);
    }

    pub fn for_host(&self, host: HostType) -> Result<&dyn HostStrategy> {
        self.strategies
            .get(&host)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownHost {
                host: host.as_str().to_string(),
            })
    }

    pub fn get(&self, host_id: &str) -> Result<&dyn HostStrategy> {
        self.for_host(host_id.parse()?)
    }

    pub fn supported_hosts(&self) -> BTreeSet<String> {
        self.strategies
            .keys()
            .map(|h| h.as_str().to_string())
            .collect()
    }

    /// Hosts whose marker directory exists.
    pub fn available_hosts(&self) -> Vec<HostType> {
        self.strategies
            .values()
            .filter(|s| s.is_available())
            .map(|s| s.host())
            .collect()
    }
}
