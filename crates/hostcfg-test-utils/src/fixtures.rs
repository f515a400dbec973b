//! Sample host documents.
//!
//! Each carries settings outside the servers section so suites can check
//! that writes leave them alone.

/// Claude Desktop config with a `theme` next to one stdio server.
pub const CLAUDE_DESKTOP_WITH_THEME: &str = r#"{
  "theme": "dark",
  "mcpServers": {
    "existing": {
      "command": "node",
      "args": ["existing.js"]
    }
  }
}
"#;

/// Codex config with a `[features]` table and one server.
pub const CODEX_WITH_FEATURES: &str = r#"# user settings
model = "o4-mini"

[features]
web_search = true

[mcp_servers.docs]
command = "npx"
arguments = ["-y", "docs-mcp"]

[mcp_servers.docs.env]
API_KEY = "secret"
"#;

/// VS Code config keyed by `servers` with an `inputs` array.
pub const VSCODE_WITH_INPUTS: &str = r#"{
  "inputs": [
    {"type": "promptString", "id": "token", "description": "API token"}
  ],
  "servers": {
    "github": {
      "type": "http",
      "url": "https://api.example.com/mcp"
    }
  }
}
"#;

/// Gemini settings that also hold unrelated CLI options.
pub const GEMINI_SETTINGS: &str = r#"{
  "selectedAuthType": "oauth-personal",
  "mcpServers": {}
}
"#;

/// Not JSON, not TOML.
pub const MALFORMED: &str = "{ this is : not valid [";
