//! Codex: TOML host with renamed fields (`args` → `arguments`, ...) and
//! transport-specific options.

use super::{McpAdapter, require_if_present, require_single_transport};
use hostcfg_meta::{FieldMap, HostType, Result, fields};

/// Options that only apply to remote servers.
const URL_ONLY: &[&str] = &[fields::BEARER_TOKEN_ENV_VAR, fields::ENV_HTTP_HEADERS];

/// Options that only apply to local processes.
const COMMAND_ONLY: &[&str] = &[fields::CWD, fields::ENV_VARS];

#[derive(Debug, Clone, Copy, Default)]
pub struct CodexAdapter;

impl McpAdapter for CodexAdapter {
    fn host(&self) -> HostType {
        HostType::Codex
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        let host = self.host();
        require_single_transport(host, filtered)?;
        for field in URL_ONLY {
            require_if_present(host, filtered, field, fields::URL)?;
        }
        for field in COMMAND_ONLY {
            require_if_present(host, filtered, field, fields::COMMAND)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostcfg_meta::McpServerConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fields_are_renamed() {
        let config = McpServerConfig {
            include_tools: Some(vec!["search".into()]),
            ..McpServerConfig::stdio("s", "python", vec!["server.py".into()])
        };
        let out = CodexAdapter.serialize(&config).unwrap();
        assert_eq!(
            serde_json::Value::Object(out),
            json!({
                "command": "python",
                "arguments": ["server.py"],
                "enabled_tools": ["search"],
            })
        );
    }

    #[test]
    fn bearer_token_requires_url() {
        let config = McpServerConfig {
            bearer_token_env_var: Some("TOKEN".into()),
            ..McpServerConfig::stdio("s", "python", vec![])
        };
        assert!(CodexAdapter.serialize(&config).is_err());
    }

    #[test]
    fn cwd_requires_command() {
        let config = McpServerConfig {
            cwd: Some("/srv".into()),
            ..McpServerConfig::remote("s", "https://example.com/mcp")
        };
        assert!(CodexAdapter.serialize(&config).is_err());
    }
}
