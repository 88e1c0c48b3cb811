//! Code-table tools: get_hunkuk_codes, get_workout_affil_codes, get_sex_codes.

use gonghun_core::{CodeTable, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::error::respond;

/// Implementation of the code-table tools: the table as `{code: label}`.
pub fn codes_impl(table: CodeTable) -> Result<CallToolResult, McpError> {
    tracing::debug!(table = table.field(), "listing code table");
    respond(Ok::<_, Error>(table.to_json()))
}
