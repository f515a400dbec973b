//! The unified MCP server record.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name → value view of a record or a host entry.
pub type FieldMap = Map<String, Value>;

/// Transport discriminator written as `type` by hosts that use one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Stdio,
    Sse,
    Http,
}

impl TransportType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportType::Stdio => "stdio",
            TransportType::Sse => "sse",
            TransportType::Http => "http",
        }
    }
}

/// Superset of every field any host accepts.
///
/// Unset fields stay `None` and are never written, so "unset" and
/// "empty/false" remain distinct. Keys no typed field claims land in
/// `extra` and are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Internal identifier; never serialized into a host file.
    #[serde(skip)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, rename = "httpUrl", skip_serializing_if = "Option::is_none")]
    pub http_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,

    // VS Code / Cursor
    #[serde(default, rename = "envFile", skip_serializing_if = "Option::is_none")]
    pub env_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<Value>>,

    // Gemini
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, rename = "includeTools", skip_serializing_if = "Option::is_none")]
    pub include_tools: Option<Vec<String>>,
    #[serde(default, rename = "excludeTools", skip_serializing_if = "Option::is_none")]
    pub exclude_tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_enabled: Option<bool>,
    #[serde(default, rename = "oauth_clientId", skip_serializing_if = "Option::is_none")]
    pub oauth_client_id: Option<String>,
    #[serde(default, rename = "oauth_clientSecret", skip_serializing_if = "Option::is_none")]
    pub oauth_client_secret: Option<String>,
    #[serde(
        default,
        rename = "oauth_authorizationUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub oauth_authorization_url: Option<String>,
    #[serde(default, rename = "oauth_tokenUrl", skip_serializing_if = "Option::is_none")]
    pub oauth_token_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_scopes: Option<Vec<String>>,
    #[serde(default, rename = "oauth_redirectUri", skip_serializing_if = "Option::is_none")]
    pub oauth_redirect_uri: Option<String>,
    #[serde(
        default,
        rename = "oauth_tokenParamName",
        skip_serializing_if = "Option::is_none"
    )]
    pub oauth_token_param_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_audiences: Option<Vec<String>>,
    #[serde(default, rename = "authProviderType", skip_serializing_if = "Option::is_none")]
    pub auth_provider_type: Option<String>,

    // Kiro
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, rename = "autoApprove", skip_serializing_if = "Option::is_none")]
    pub auto_approve: Option<Vec<String>>,
    #[serde(default, rename = "disabledTools", skip_serializing_if = "Option::is_none")]
    pub disabled_tools: Option<Vec<String>>,

    // Codex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_vars: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_timeout_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_timeout_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token_env_var: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_http_headers: Option<BTreeMap<String, String>>,

    /// Unrecognized keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl McpServerConfig {
    /// Local process server.
    ///
    /// An empty `args` leaves the field unset so no `args` key is written.
    /// Set `args: Some(vec![])` directly to write an explicit empty list.
    pub fn stdio(name: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            command: Some(command.into()),
            args: (!args.is_empty()).then_some(args),
            ..Default::default()
        }
    }

    /// Remote server reached by URL.
    pub fn remote(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set fields keyed by unified name. `null` values are dropped.
    pub fn to_field_map(&self) -> FieldMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
            // Every field serializes to JSON; an object is always produced.
            _ => FieldMap::new(),
        }
    }

    /// Build a record from a unified-name field map.
    pub fn from_field_map(name: impl Into<String>, map: FieldMap) -> Result<Self> {
        let name = name.into();
        let mut config: Self =
            serde_json::from_value(Value::Object(map)).map_err(|e| Error::InvalidRecord {
                name: name.clone(),
                message: e.to_string(),
            })?;
        config.name = name;
        Ok(config)
    }

    /// Build a record that keeps every key verbatim in `extra`.
    ///
    /// Used for host entries whose known fields have unexpected types, so a
    /// rewrite of the file reproduces them unchanged.
    pub fn opaque(name: impl Into<String>, map: FieldMap) -> Self {
        Self {
            name: name.into(),
            extra: map.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Like [`Self::from_field_map`], falling back to [`Self::opaque`].
    pub fn from_field_map_lossless(name: impl Into<String>, map: FieldMap) -> Self {
        let name = name.into();
        Self::from_field_map(name.clone(), map.clone()).unwrap_or_else(|_| Self::opaque(name, map))
    }

    /// Whether `field` (unified name) is set.
    pub fn has_field(&self, field: &str) -> bool {
        self.to_field_map().contains_key(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unset_fields_are_absent() {
        let config = McpServerConfig::stdio("s1", "python", vec!["server.py".into()]);
        let map = config.to_field_map();
        assert_eq!(
            Value::Object(map),
            json!({"command": "python", "args": ["server.py"]})
        );
    }

    #[test]
    fn empty_and_false_are_kept() {
        let config = McpServerConfig {
            command: Some("node".into()),
            args: Some(vec![]),
            trust: Some(false),
            ..Default::default()
        };
        let map = config.to_field_map();
        assert_eq!(map.get("args"), Some(&json!([])));
        assert_eq!(map.get("trust"), Some(&json!(false)));
    }

    #[test]
    fn stdio_without_args_leaves_field_unset() {
        let bare = McpServerConfig::stdio("s1", "node", vec![]);
        assert_eq!(bare.args, None);
        assert!(!bare.to_field_map().contains_key("args"));

        let explicit = McpServerConfig {
            args: Some(vec![]),
            ..bare
        };
        assert_eq!(explicit.to_field_map().get("args"), Some(&json!([])));
    }

    #[test]
    fn name_is_never_serialized() {
        let config = McpServerConfig::remote("remote", "https://example.com/mcp");
        assert!(!config.to_field_map().contains_key("name"));
    }

    #[test]
    fn unknown_keys_go_to_extra() {
        let map = json!({"command": "uvx", "alwaysAllow": ["read"]});
        let Value::Object(map) = map else { unreachable!() };

        let config = McpServerConfig::from_field_map("s", map).unwrap();

        assert_eq!(config.command.as_deref(), Some("uvx"));
        assert_eq!(config.extra.get("alwaysAllow"), Some(&json!(["read"])));
        assert_eq!(config.to_field_map().get("alwaysAllow"), Some(&json!(["read"])));
    }

    #[test]
    fn mistyped_entry_is_kept_opaque() {
        let Value::Object(map) = json!({"command": "x", "timeout": "soon"}) else {
            unreachable!()
        };

        let config = McpServerConfig::from_field_map_lossless("s", map.clone());

        assert_eq!(config.name, "s");
        assert!(config.command.is_none());
        assert_eq!(config.to_field_map(), map);
    }
}
