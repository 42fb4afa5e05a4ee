//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{CacheGetParams, ResolveParams, get_impl, resolve_impl};

use eiregion_core::Resolver;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The MCP server handler for eiregion.
#[derive(Clone)]
pub struct EiRegionServer {
    resolver: Resolver,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
#[tool_router]
impl EiRegionServer {
    /// Create a new server handler around a resolver.
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver, tool_router: Self::tool_router() }
    }

    /// Resolve a postal code to its EI economic region.
    #[tool(
        description = "Resolve a Canadian postal code to its EI economic region. Returns postal fields with the region's unemployment rate and benefit weeks nested under EconomicRegion. Cached rows older than the freshness threshold are refetched."
    )]
    async fn resolve_postal_code(&self, params: Parameters<ResolveParams>) -> Result<CallToolResult, McpError> {
        resolve_impl(&self.resolver, params.0).await
    }

    /// Read a cached postal record without fetching.
    #[tool(
        description = "Read the cached record for a postal code without contacting the remote site. Returns null when nothing is cached; Stale marks rows past the freshness threshold."
    )]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.resolver, params.0).await
    }
}

impl ServerHandler for EiRegionServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "eiregion".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn test_tools_listed() {
        let (resolver, _db, _source) = testing::resolver(false).await;
        let server = EiRegionServer::new(resolver);

        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["cache_get", "resolve_postal_code"]);
    }

    #[tokio::test]
    async fn test_server_info() {
        let (resolver, _db, _source) = testing::resolver(false).await;
        let info = EiRegionServer::new(resolver).get_info();
        assert_eq!(info.server_info.name, "eiregion");
        assert!(info.capabilities.tools.is_some());
    }
}
