//! Codex stores servers as TOML tables in `~/.codex/config.toml`:
//!
//! ```toml
//! [features]
//! web_search = true
//!
//! [mcp_servers.docs]
//! command = "npx"
//! arguments = ["-y", "docs-mcp"]
//!
//! [mcp_servers.docs.env]
//! API_KEY = "..."
//! ```
//!
//! Only the `mcp_servers` table is rewritten; every other table, comment
//! and formatting choice is kept through `toml_edit`.

use super::{
    HostConfiguration, HostContext, HostLocation, HostStrategy, WriteReceipt, guarded_write,
    malformed_base, read_error, require_path,
};
use crate::Result;
use hostcfg_fs::io;
use hostcfg_meta::{CapabilityRegistry, FieldMap, HostType, McpServerConfig, fields};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, Value};

const ROOT_KEY: &str = "mcp_servers";
const LOCATION: HostLocation = HostLocation::HomeRelative(".codex/config.toml");
const MARKER: HostLocation = HostLocation::HomeRelative(".codex");

#[derive(Debug, Clone)]
pub struct TomlHostStrategy {
    ctx: HostContext,
}

impl TomlHostStrategy {
    pub fn new(ctx: HostContext) -> Self {
        Self { ctx }
    }

    fn servers_from_str(&self, path: &Path, content: &str) -> Result<HostConfiguration> {
        let doc: toml::Table =
            toml::from_str(content).map_err(|e| read_error(self.host(), path, e.to_string()))?;

        let Some(section) = doc.get(ROOT_KEY) else {
            return Ok(HostConfiguration::new());
        };
        let Some(section) = section.as_table() else {
            return Err(read_error(
                self.host(),
                path,
                format!("'{ROOT_KEY}' is not a table"),
            ));
        };

        let caps = CapabilityRegistry::global().for_host(self.host());
        let mut config = HostConfiguration::new();
        for (name, entry) in section {
            match serde_json::to_value(entry)? {
                JsonValue::Object(native) => {
                    let unified = caps.from_native(native);
                    config.insert(McpServerConfig::from_field_map_lossless(name, unified));
                }
                other => {
                    tracing::debug!(server = %name, "Keeping non-table Codex server entry as is");
                    config.insert_passthrough(name, other);
                }
            }
        }
        Ok(config)
    }
}

/// Convert a JSON value to a TOML value. `null` has no TOML form.
fn to_toml(value: &JsonValue) -> Option<Value> {
    match value {
        JsonValue::Null => None,
        JsonValue::Bool(b) => Some(Value::from(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::from(i)),
            None => n.as_f64().map(Value::from),
        },
        JsonValue::String(s) => Some(Value::from(s.as_str())),
        JsonValue::Array(items) => {
            let mut array = Array::new();
            for item in items.iter().filter_map(to_toml) {
                array.push(item);
            }
            Some(Value::Array(array))
        }
        JsonValue::Object(map) => {
            let mut table = InlineTable::new();
            for (k, v) in map {
                if let Some(v) = to_toml(v) {
                    table.insert(k.as_str(), v);
                }
            }
            Some(Value::InlineTable(table))
        }
    }
}

/// One `[mcp_servers.<name>]` table; `env` becomes its own sub-table.
fn server_table(native: &FieldMap) -> Table {
    let mut table = Table::new();
    for (key, value) in native {
        if key == fields::ENV
            && let JsonValue::Object(vars) = value
        {
            let mut env = Table::new();
            for (name, var) in vars {
                if let Some(var) = to_toml(var) {
                    env.insert(name, Item::Value(var));
                }
            }
            table.insert(key, Item::Table(env));
            continue;
        }
        if let Some(value) = to_toml(value) {
            table.insert(key, Item::Value(value));
        }
    }
    table
}

impl HostStrategy for TomlHostStrategy {
    fn host(&self) -> HostType {
        HostType::Codex
    }

    fn config_path(&self) -> Option<PathBuf> {
        self.ctx.resolve(&LOCATION)
    }

    fn config_key(&self) -> &'static str {
        ROOT_KEY
    }

    fn is_available(&self) -> bool {
        self.ctx.resolve(&MARKER).is_some_and(|dir| dir.is_dir())
    }

    fn try_read_configuration(&self) -> Result<HostConfiguration> {
        let path = require_path(self.host(), self.config_path())?;
        match io::read_text_optional(&path)? {
            Some(content) => self.servers_from_str(&path, &content),
            None => Ok(HostConfiguration::new()),
        }
    }

    fn write_configuration(
        &self,
        config: &HostConfiguration,
        skip_backup: bool,
    ) -> Result<WriteReceipt> {
        let host = self.host();
        let path = require_path(host, self.config_path())?;

        let original = io::read_text_optional(&path)?;
        let mut doc = match original.as_deref().map(str::parse::<DocumentMut>) {
            None => DocumentMut::new(),
            Some(Ok(doc)) => doc,
            Some(Err(e)) => {
                malformed_base(host, &path, &e.to_string(), skip_backup)?;
                DocumentMut::new()
            }
        };

        let caps = CapabilityRegistry::global().for_host(host);
        let mut servers = Table::new();
        servers.set_implicit(true);
        let entries = config
            .native_entries(|server| JsonValue::Object(caps.to_native(server.to_field_map())));
        for (name, entry) in &entries {
            match entry {
                JsonValue::Object(native) => {
                    servers.insert(name, Item::Table(server_table(native)));
                }
                other => {
                    if let Some(value) = to_toml(other) {
                        servers.insert(name, Item::Value(value));
                    }
                }
            }
        }
        doc.remove(ROOT_KEY);
        doc.insert(ROOT_KEY, Item::Table(servers));

        let backup = guarded_write(
            &self.ctx,
            host,
            &path,
            original.as_deref(),
            &doc.to_string(),
            skip_backup,
        )?;

        tracing::debug!(servers = config.len(), path = %path.display(), "Wrote Codex configuration");
        Ok(WriteReceipt { path, backup })
    }
}
