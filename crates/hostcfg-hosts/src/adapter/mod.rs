//! Adapters: validate and reshape a unified record for one host.
//!
//! The default pipeline is `filter_fields` → `validate_filtered` → rename
//! via the host's field mappings. Hosts only supply their structural rules;
//! the field sets and mappings come from [`CapabilityRegistry`].

mod claude;
mod codex;
mod cursor;
mod gemini;
mod kiro;
mod lmstudio;
mod registry;
mod vscode;

pub use claude::{ClaudeAdapter, ClaudeVariant};
pub use codex::CodexAdapter;
pub use cursor::CursorAdapter;
pub use gemini::GeminiAdapter;
pub use kiro::KiroAdapter;
pub use lmstudio::LmStudioAdapter;
pub use registry::AdapterRegistry;
pub use vscode::VsCodeAdapter;

use hostcfg_meta::fields;
use hostcfg_meta::{
    CapabilityRegistry, Error, FieldMap, HostCapabilities, HostType, McpServerConfig, Result,
};
use serde_json::Value;
use std::collections::BTreeSet;

/// Validation and serialization of server records for one host.
pub trait McpAdapter: Send + Sync {
    fn host(&self) -> HostType;

    fn capabilities(&self) -> &'static HostCapabilities {
        CapabilityRegistry::global().for_host(self.host())
    }

    fn supported_fields(&self) -> &'static BTreeSet<&'static str> {
        &self.capabilities().supported_fields
    }

    /// Keep only fields the host supports, minus the always-excluded ones.
    /// Unset and `null` values are dropped.
    fn filter_fields(&self, config: &McpServerConfig) -> FieldMap {
        let caps = self.capabilities();
        config
            .to_field_map()
            .into_iter()
            .filter(|(k, v)| caps.supports(k) && !v.is_null())
            .collect()
    }

    /// Structural rules on an already filtered map.
    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()>;

    /// Filter and validate, returning the record as the host will store it
    /// (unified field names).
    fn prepare(&self, config: &McpServerConfig) -> Result<McpServerConfig> {
        let filtered = self.filter_fields(config);
        self.validate_filtered(&filtered)?;
        Ok(McpServerConfig::from_field_map_lossless(
            config.name.clone(),
            filtered,
        ))
    }

    /// Filter, validate and rename to host-native field names.
    fn serialize(&self, config: &McpServerConfig) -> Result<FieldMap> {
        let filtered = self.filter_fields(config);
        self.validate_filtered(&filtered)?;
        Ok(self.capabilities().to_native(filtered))
    }
}

/// Exactly one of the host's transport fields must be present.
pub(crate) fn require_single_transport(host: HostType, filtered: &FieldMap) -> Result<()> {
    let transports = CapabilityRegistry::global().for_host(host).transport_fields;
    let present: Vec<&str> = transports
        .iter()
        .copied()
        .filter(|t| filtered.contains_key(*t))
        .collect();

    match present.len() {
        1 => Ok(()),
        0 => Err(Error::validation(
            host.as_str(),
            transports.join("|"),
            format!("one of {} is required", transports.join(", ")),
        )),
        _ => Err(Error::validation(
            host.as_str(),
            present.join("|"),
            format!("only one transport may be set, found {}", present.join(" and ")),
        )),
    }
}

/// `type` must agree with the chosen transport.
pub(crate) fn check_type_consistency(host: HostType, filtered: &FieldMap) -> Result<()> {
    let Some(kind) = filtered.get(fields::TYPE) else {
        return Ok(());
    };

    let required = match kind.as_str() {
        Some("stdio") => fields::COMMAND,
        Some("sse") | Some("http") => fields::URL,
        _ => {
            return Err(Error::validation(
                host.as_str(),
                fields::TYPE,
                format!("must be one of stdio, sse, http (got {kind})"),
            ));
        }
    };

    if filtered.contains_key(required) {
        Ok(())
    } else {
        Err(Error::validation(
            host.as_str(),
            fields::TYPE,
            format!("type {kind} requires '{required}'"),
        ))
    }
}

/// `field` present ⇒ `required` present.
pub(crate) fn require_if_present(
    host: HostType,
    filtered: &FieldMap,
    field: &str,
    required: &str,
) -> Result<()> {
    if filtered.contains_key(field) && !filtered.contains_key(required) {
        return Err(Error::validation(
            host.as_str(),
            field,
            format!("requires '{required}' to be set"),
        ));
    }
    Ok(())
}

/// String items of an array field.
pub(crate) fn string_items<'a>(filtered: &'a FieldMap, field: &str) -> BTreeSet<&'a str> {
    filtered
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
