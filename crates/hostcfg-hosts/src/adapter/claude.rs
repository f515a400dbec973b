//! Claude Desktop and Claude Code.
//!
//! Both hosts accept the same fields and rules; only the id differs.

use super::{McpAdapter, check_type_consistency, require_single_transport};
use hostcfg_meta::{FieldMap, HostType, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeVariant {
    Desktop,
    Code,
}

#[derive(Debug, Clone, Copy)]
pub struct ClaudeAdapter {
    variant: ClaudeVariant,
}

impl ClaudeAdapter {
    pub fn new(variant: ClaudeVariant) -> Self {
        Self { variant }
    }

    pub fn desktop() -> Self {
        Self::new(ClaudeVariant::Desktop)
    }

    pub fn code() -> Self {
        Self::new(ClaudeVariant::Code)
    }

    pub fn variant(&self) -> ClaudeVariant {
        self.variant
    }
}

impl McpAdapter for ClaudeAdapter {
    fn host(&self) -> HostType {
        match self.variant {
            ClaudeVariant::Desktop => HostType::ClaudeDesktop,
            ClaudeVariant::Code => HostType::ClaudeCode,
        }
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        require_single_transport(self.host(), filtered)?;
        check_type_consistency(self.host(), filtered)
    }
}
