use crate::results::{FieldOperation, OperationResult};
use hostcfg_hosts::McpAdapter;
use hostcfg_meta::{FieldMap, McpServerConfig};

/// Compare the stored field map of an entry with its replacement.
///
/// Fields of `new` come first in their own order, then fields only `old`
/// has (reported as updated to nothing).
pub fn diff_fields(old: &FieldMap, new: &FieldMap) -> Vec<FieldOperation> {
    let mut operations: Vec<FieldOperation> = new
        .iter()
        .map(|(field, value)| match old.get(field) {
            Some(previous) if previous == value => FieldOperation::unchanged(field, value.clone()),
            previous => FieldOperation::updated(field, previous.cloned(), Some(value.clone())),
        })
        .collect();

    operations.extend(
        old.iter()
            .filter(|(field, _)| !new.contains_key(*field))
            .map(|(field, value)| FieldOperation::updated(field, Some(value.clone()), None)),
    );
    operations
}

/// A validated entry ready to merge, with its field report.
#[derive(Debug, Clone)]
pub(crate) struct PlannedEntry {
    pub entry: McpServerConfig,
    pub result: OperationResult,
}

impl PlannedEntry {
    pub fn changed(&self) -> bool {
        self.result.changed()
    }
}

/// Validate `server` for the adapter's host and diff it against `existing`.
///
/// Fields the host does not accept are reported as unsupported and left
/// out of the entry.
pub(crate) fn plan_entry(
    adapter: &dyn McpAdapter,
    existing: Option<&McpServerConfig>,
    server: &McpServerConfig,
) -> hostcfg_meta::Result<PlannedEntry> {
    let entry = adapter.prepare(server)?;

    let old = existing.map(McpServerConfig::to_field_map).unwrap_or_default();
    let mut operations = diff_fields(&old, &entry.to_field_map());

    let caps = adapter.capabilities();
    operations.extend(
        server
            .to_field_map()
            .into_iter()
            .filter(|(field, _)| !caps.supports(field))
            .map(|(field, value)| FieldOperation::unsupported(field, value)),
    );

    let result = OperationResult::succeeded(&server.name, adapter.host().as_str(), operations);
    Ok(PlannedEntry { entry, result })
}
