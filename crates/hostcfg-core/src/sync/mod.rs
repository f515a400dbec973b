//! Propagation of server definitions to many hosts
//!
//! - **selection**: the request (source, targets, which servers, flags)
//! - **diff**: field-level comparison of a new entry with the stored one
//! - **engine**: per-target read, merge and one batched write

mod diff;
mod engine;
mod selection;

pub use diff::diff_fields;
pub use engine::SyncEngine;
pub use selection::{ServerSelection, SyncRequest, SyncSource};

pub(crate) use diff::plan_entry;
