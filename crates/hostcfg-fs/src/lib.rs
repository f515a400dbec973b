//! Filesystem layer for hostcfg
//!
//! Provides the safety primitives every host strategy writes through:
//! atomic replace, timestamped backups with rollback, checksums and a
//! format-agnostic settings store.

pub mod backup;
pub mod checksum;
pub mod config;
pub mod error;
pub mod io;

pub use backup::{BackupManager, BackupRecord, ExpectedState, PrunePolicy, WriteRequest};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
