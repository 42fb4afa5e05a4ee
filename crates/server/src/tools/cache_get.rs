//! cache_get tool implementation.
//!
//! Reads a stored postal record without contacting the remote source.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use eiregion_core::{CachedPostal, Resolver};

use super::json_result;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Canadian postal code; case and whitespace are ignored.
    pub postal_code: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// The stored record with its staleness, or null when nothing is cached.
    pub cached: Option<CachedPostal>,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(resolver: &Resolver, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let cached = resolver.cached_postal(&params.postal_code).await?;
    json_result(&CacheGetOutput { cached })
}
