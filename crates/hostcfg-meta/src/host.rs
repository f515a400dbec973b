//! Supported host applications

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A host application that reads MCP server definitions from a local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HostType {
    #[serde(rename = "claude-desktop")]
    ClaudeDesktop,
    #[serde(rename = "claude-code")]
    ClaudeCode,
    #[serde(rename = "vscode")]
    VsCode,
    #[serde(rename = "cursor")]
    Cursor,
    #[serde(rename = "lmstudio")]
    LmStudio,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "kiro")]
    Kiro,
    #[serde(rename = "codex")]
    Codex,
}

impl HostType {
    /// Every host, in registration order.
    pub const ALL: [HostType; 8] = [
        HostType::ClaudeDesktop,
        HostType::ClaudeCode,
        HostType::VsCode,
        HostType::Cursor,
        HostType::LmStudio,
        HostType::Gemini,
        HostType::Kiro,
        HostType::Codex,
    ];

    /// Position in [`HostType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostType::ClaudeDesktop => "claude-desktop",
            HostType::ClaudeCode => "claude-code",
            HostType::VsCode => "vscode",
            HostType::Cursor => "cursor",
            HostType::LmStudio => "lmstudio",
            HostType::Gemini => "gemini",
            HostType::Kiro => "kiro",
            HostType::Codex => "codex",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(self) -> &'static str {
        match self {
            HostType::ClaudeDesktop => "Claude Desktop",
            HostType::ClaudeCode => "Claude Code",
            HostType::VsCode => "VS Code",
            HostType::Cursor => "Cursor",
            HostType::LmStudio => "LM Studio",
            HostType::Gemini => "Gemini CLI",
            HostType::Kiro => "Kiro",
            HostType::Codex => "Codex",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HostType::ALL
            .into_iter()
            .find(|host| host.as_str() == s)
            .ok_or_else(|| Error::UnknownHost {
                host: s.to_string(),
            })
    }
}
