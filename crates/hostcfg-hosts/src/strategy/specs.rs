//! File locations and root keys of the JSON hosts.
//!
//! # Adding a JSON host
//!
//! 1. Add a `fn <host>_spec() -> JsonHostSpec` below.
//! 2. Add the host to the `match` in [`json_host_spec`].

use super::{HostLocation, JsonHostSpec};
use hostcfg_meta::HostType;

/// Spec for a JSON host, `None` for hosts with another file format.
pub fn json_host_spec(host: HostType) -> Option<JsonHostSpec> {
    match host {
        HostType::ClaudeDesktop => Some(claude_desktop_spec()),
        HostType::ClaudeCode => Some(claude_code_spec()),
        HostType::VsCode => Some(vscode_spec()),
        HostType::Cursor => Some(cursor_spec()),
        HostType::LmStudio => Some(lmstudio_spec()),
        HostType::Gemini => Some(gemini_spec()),
        HostType::Kiro => Some(kiro_spec()),
        HostType::Codex => None,
    }
}

fn claude_desktop_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::ClaudeDesktop,
        root_key: "mcpServers",
        location: HostLocation::OsSpecific {
            macos: "Library/Application Support/Claude/claude_desktop_config.json",
            linux: ".config/Claude/claude_desktop_config.json",
            windows: "AppData/Roaming/Claude/claude_desktop_config.json",
        },
        marker: None,
        verify_after_write: false,
    }
}

fn claude_code_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::ClaudeCode,
        root_key: "mcpServers",
        location: HostLocation::HomeRelative(".claude.json"),
        marker: Some(HostLocation::HomeRelative(".claude")),
        verify_after_write: false,
    }
}

fn vscode_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::VsCode,
        root_key: "servers",
        location: HostLocation::OsSpecific {
            macos: "Library/Application Support/Code/User/mcp.json",
            linux: ".config/Code/User/mcp.json",
            windows: "AppData/Roaming/Code/User/mcp.json",
        },
        marker: None,
        verify_after_write: false,
    }
}

fn cursor_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::Cursor,
        root_key: "mcpServers",
        location: HostLocation::HomeRelative(".cursor/mcp.json"),
        marker: None,
        verify_after_write: false,
    }
}

fn lmstudio_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::LmStudio,
        root_key: "mcpServers",
        location: HostLocation::HomeRelative(".lmstudio/mcp.json"),
        marker: None,
        verify_after_write: false,
    }
}

// settings.json also carries the CLI's own settings, so writes are
// re-read to confirm the servers section survived.
fn gemini_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::Gemini,
        root_key: "mcpServers",
        location: HostLocation::HomeRelative(".gemini/settings.json"),
        marker: None,
        verify_after_write: true,
    }
}

fn kiro_spec() -> JsonHostSpec {
    JsonHostSpec {
        host: HostType::Kiro,
        root_key: "mcpServers",
        location: HostLocation::HomeRelative(".kiro/settings/mcp.json"),
        marker: Some(HostLocation::HomeRelative(".kiro")),
        verify_after_write: false,
    }
}
