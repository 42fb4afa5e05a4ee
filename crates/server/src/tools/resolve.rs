//! resolve_postal_code tool implementation.
//!
//! Resolves a postal code to its economic region, refreshing stale rows from
//! the remote source.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use eiregion_core::Resolver;

use super::json_result;

/// Input parameters for the resolve_postal_code tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveParams {
    /// Canadian postal code; case and whitespace are ignored.
    pub postal_code: String,
}

/// Implementation of the resolve_postal_code tool.
pub async fn resolve_impl(resolver: &Resolver, params: ResolveParams) -> Result<CallToolResult, McpError> {
    let result = resolver.lookup_postal(&params.postal_code).await.inspect_err(|e| {
        tracing::warn!(postal_code = %params.postal_code, error = %e, "resolve_postal_code failed");
    })?;
    json_result(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use rmcp::model::RawContent;

    fn text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_impl_returns_nested_region() {
        let (resolver, _db, _source) = testing::resolver(false).await;
        let params = ResolveParams { postal_code: "k1a 0b1".into() };

        let result = resolve_impl(&resolver, params).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(json["PostalCode"], "K1A0B1");
        assert_eq!(json["EconomicRegion"]["UnemploymentRate"], "5.6");
    }

    #[tokio::test]
    async fn test_resolve_impl_invalid_input() {
        let (resolver, _db, source) = testing::resolver(false).await;
        let params = ResolveParams { postal_code: "   ".into() };

        let err = resolve_impl(&resolver, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn test_resolve_impl_fetch_failure() {
        let (resolver, _db, _source) = testing::resolver(true).await;
        let params = ResolveParams { postal_code: "K1A0B1".into() };

        let err = resolve_impl(&resolver, params).await.unwrap_err();
        assert!(err.message.starts_with("HTTP_ERROR"));
    }
}
