//! VS Code: `servers` root key, `envFile` and `inputs` support.

use super::{McpAdapter, check_type_consistency, require_if_present, require_single_transport};
use hostcfg_meta::{FieldMap, HostType, Result, fields};

#[derive(Debug, Clone, Copy, Default)]
pub struct VsCodeAdapter;

impl McpAdapter for VsCodeAdapter {
    fn host(&self) -> HostType {
        HostType::VsCode
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        require_single_transport(self.host(), filtered)?;
        check_type_consistency(self.host(), filtered)?;
        require_if_present(self.host(), filtered, fields::ENV_FILE, fields::COMMAND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostcfg_meta::McpServerConfig;
    use serde_json::json;

    #[test]
    fn inputs_pass_through() {
        let config = McpServerConfig {
            inputs: Some(vec![json!({"id": "token", "type": "promptString"})]),
            ..McpServerConfig::stdio("s", "node", vec!["index.js".into()])
        };
        let out = VsCodeAdapter.serialize(&config).unwrap();
        assert!(out.contains_key("inputs"));
    }

    #[test]
    fn env_file_needs_command() {
        let config = McpServerConfig {
            env_file: Some(".env".into()),
            ..McpServerConfig::remote("s", "https://example.com/mcp")
        };
        assert!(VsCodeAdapter.serialize(&config).is_err());
    }
}
