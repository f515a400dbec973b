//! Configuration and synchronization of MCP servers across hosts
//!
//! `hostcfg-core` sits on top of the host integrations and exposes the
//! operations a front end calls:
//!
//! - **[`HostConfigManager`]**: configure or remove one server on one host,
//!   list a host's servers, manage backups, detect installed hosts
//! - **[`SyncEngine`]**: push a set of servers from an environment or another
//!   host to many hosts, one batched write per host
//! - **[`Settings`]**: backup location and write robustness, read from
//!   `~/.hostcfg/config.toml`
//!
//! # Architecture
//!
//! ```text
//!                  hostcfg-core
//!                       |
//!                 hostcfg-hosts
//!                  /         \
//!         hostcfg-meta     hostcfg-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use hostcfg_core::{HostConfigManager, WriteOptions};
//! use hostcfg_meta::McpServerConfig;
//!
//! fn example() -> hostcfg_core::Result<()> {
//!     let manager = HostConfigManager::for_current_user()?;
//!     let server = McpServerConfig::stdio("docs", "npx", vec!["-y".into(), "docs-mcp".into()]);
//!     let result = manager.configure(&server, "cursor", WriteOptions::default())?;
//!     assert!(result.success);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod results;
pub mod sync;

pub use config::Settings;
pub use error::{Error, Result};
pub use manager::{HostConfigManager, WriteOptions};
pub use results::{FieldChange, FieldOperation, OperationResult, SyncResult};
pub use sync::{ServerSelection, SyncEngine, SyncRequest, SyncSource};
