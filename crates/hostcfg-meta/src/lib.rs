//! Static metadata for hostcfg
//!
//! - [`HostType`]: the supported host applications and their string ids.
//! - [`fields`]: field-name constants and the per-host field sets, built by
//!   explicit unions.
//! - [`CapabilityRegistry`]: one immutable [`HostCapabilities`] descriptor
//!   per host plus cross-host field equivalences used during sync.
//! - [`McpServerConfig`]: the unified server record every layer passes
//!   around.

pub mod capabilities;
pub mod error;
pub mod fields;
pub mod host;
pub mod record;

pub use capabilities::{CapabilityRegistry, FieldEquivalence, HostCapabilities};
pub use error::{Error, Result};
pub use host::HostType;
pub use record::{FieldMap, McpServerConfig, TransportType};
