//! Host integrations for hostcfg.
//!
//! Two layers per host:
//!
//! 1. **Adapters** ([`adapter`]) validate a unified [`McpServerConfig`] against
//!    the host's field contract and reshape it into the host's field names.
//!    They are pure.
//!
//! 2. **Strategies** ([`strategy`]) locate the host's configuration file, read
//!    it into a [`HostConfiguration`] and write it back through the guarded
//!    backup-then-replace path, preserving everything outside the servers
//!    section.
//!
//! Both are looked up through registries built by an explicit
//! `with_builtins` call.
//!
//! [`McpServerConfig`]: hostcfg_meta::McpServerConfig

pub mod adapter;
pub mod error;
pub mod strategy;

pub use adapter::{AdapterRegistry, McpAdapter};
pub use error::{Error, Result};
pub use strategy::{
    HostConfiguration, HostContext, HostLocation, HostStrategy, Platform, StrategyRegistry,
    WriteReceipt,
};
