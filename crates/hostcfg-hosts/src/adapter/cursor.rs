//! Cursor: the Claude field set plus `envFile`.

use super::{McpAdapter, check_type_consistency, require_if_present, require_single_transport};
use hostcfg_meta::{FieldMap, HostType, Result, fields};

#[derive(Debug, Clone, Copy, Default)]
pub struct CursorAdapter;

impl McpAdapter for CursorAdapter {
    fn host(&self) -> HostType {
        HostType::Cursor
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        require_single_transport(self.host(), filtered)?;
        check_type_consistency(self.host(), filtered)?;
        require_if_present(self.host(), filtered, fields::ENV_FILE, fields::COMMAND)
    }
}
