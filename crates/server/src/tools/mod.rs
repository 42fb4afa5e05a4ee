//! MCP tool implementations.
//!
//! This module contains all tools exposed by the eiregion server.

pub mod cache_get;
pub mod resolve;

pub use cache_get::{CacheGetParams, get_impl};
pub use resolve::{ResolveParams, resolve_impl};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Render a tool output as pretty JSON text content.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| McpError::internal_error(format!("failed to serialize output: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
