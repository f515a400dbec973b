//! LM Studio: same contract as Claude Desktop under its own id.

use super::{McpAdapter, check_type_consistency, require_single_transport};
use hostcfg_meta::{FieldMap, HostType, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct LmStudioAdapter;

impl McpAdapter for LmStudioAdapter {
    fn host(&self) -> HostType {
        HostType::LmStudio
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        require_single_transport(self.host(), filtered)?;
        check_type_consistency(self.host(), filtered)
    }
}
