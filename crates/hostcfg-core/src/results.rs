//! Field-level outcome reporting.
//!
//! Every executed operation reports what happened to each field of each
//! (server, host) pair. Multi-host runs report per host; there is no single
//! pass/fail for a sync.

use hostcfg_fs::BackupRecord;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// What happened to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldChange {
    /// New value differs from the stored one, the entry is new, or the field
    /// was removed from the entry.
    Updated,
    Unchanged,
    /// Present in the source but the host does not accept it; dropped.
    Unsupported,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldChange::Updated => "UPDATED",
            FieldChange::Unchanged => "UNCHANGED",
            FieldChange::Unsupported => "UNSUPPORTED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldOperation {
    /// Unified field name.
    pub field: String,
    pub change: FieldChange,
    /// Value stored on the host before the operation.
    pub old_value: Option<Value>,
    /// Value stored after the operation. For [`FieldChange::Unsupported`]
    /// this is the source value the host could not take.
    pub new_value: Option<Value>,
}

impl FieldOperation {
    pub fn updated(field: impl Into<String>, old_value: Option<Value>, new_value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            change: FieldChange::Updated,
            old_value,
            new_value,
        }
    }

    pub fn unchanged(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            change: FieldChange::Unchanged,
            old_value: Some(value.clone()),
            new_value: Some(value),
        }
    }

    pub fn unsupported(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            change: FieldChange::Unsupported,
            old_value: None,
            new_value: Some(value),
        }
    }
}

/// Outcome for one server on one host.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub server: String,
    pub host: String,
    pub success: bool,
    pub operations: Vec<FieldOperation>,
    /// Backup taken before the host file was rewritten.
    pub backup: Option<BackupRecord>,
    pub error: Option<String>,
}

impl OperationResult {
    pub fn succeeded(
        server: impl Into<String>,
        host: impl Into<String>,
        operations: Vec<FieldOperation>,
    ) -> Self {
        Self {
            server: server.into(),
            host: host.into(),
            success: true,
            operations,
            backup: None,
            error: None,
        }
    }

    pub fn failed(
        server: impl Into<String>,
        host: impl Into<String>,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            server: server.into(),
            host: host.into(),
            success: false,
            operations: Vec::new(),
            backup: None,
            error: Some(error.to_string()),
        }
    }

    /// Mark a planned result as failed, keeping its operations.
    pub fn fail(&mut self, error: impl fmt::Display) {
        self.success = false;
        self.backup = None;
        self.error = Some(error.to_string());
    }

    /// Whether any field was updated.
    pub fn changed(&self) -> bool {
        self.operations
            .iter()
            .any(|op| op.change == FieldChange::Updated)
    }

    pub fn count(&self, change: FieldChange) -> usize {
        self.operations.iter().filter(|op| op.change == change).count()
    }
}

/// Outcome of one sync run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncResult {
    /// Environment name or source host id.
    pub source: String,
    pub dry_run: bool,
    /// One entry per (server, target host) pair, in target order.
    pub results: Vec<OperationResult>,
}

impl SyncResult {
    /// Every pair succeeded.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    /// Whether every pair targeting `host` succeeded. `false` if `host` was
    /// not a target.
    pub fn host_succeeded(&self, host: &str) -> bool {
        let mut pairs = self.for_host(host).peekable();
        pairs.peek().is_some() && pairs.all(|r| r.success)
    }

    pub fn for_host<'a>(&'a self, host: &'a str) -> impl Iterator<Item = &'a OperationResult> + 'a {
        self.results.iter().filter(move |r| r.host == host)
    }

    pub fn failures(&self) -> impl Iterator<Item = &OperationResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Hosts with at least one failed pair.
    pub fn failed_hosts(&self) -> BTreeSet<&str> {
        self.failures().map(|r| r.host.as_str()).collect()
    }

    /// Hosts where every pair succeeded.
    pub fn succeeded_hosts(&self) -> BTreeSet<&str> {
        let failed = self.failed_hosts();
        self.results
            .iter()
            .map(|r| r.host.as_str())
            .filter(|h| !failed.contains(h))
            .collect()
    }

    /// Updated fields across all successful pairs.
    pub fn updated_field_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.count(FieldChange::Updated))
            .sum()
    }
}
