//! Kiro: `disabled`, `autoApprove` and `disabledTools`.

use super::{McpAdapter, require_single_transport, string_items};
use hostcfg_meta::{Error, FieldMap, HostType, Result, fields};

#[derive(Debug, Clone, Copy, Default)]
pub struct KiroAdapter;

impl McpAdapter for KiroAdapter {
    fn host(&self) -> HostType {
        HostType::Kiro
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        require_single_transport(self.host(), filtered)?;

        let approved = string_items(filtered, fields::AUTO_APPROVE);
        let disabled = string_items(filtered, fields::DISABLED_TOOLS);
        if let Some(tool) = approved.intersection(&disabled).next() {
            return Err(Error::validation(
                self.host().as_str(),
                fields::AUTO_APPROVE,
                format!("tool '{tool}' is also listed in disabledTools"),
            ));
        }
        Ok(())
    }
}
