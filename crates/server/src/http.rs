//! JSON over HTTP.
//!
//! - `GET /health` liveness probe
//! - `GET /postal/{postal_code}` cache-or-fetch resolution
//! - `GET /cache/postal/{postal_code}` stored record only, no fetch

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use eiregion_core::{CachedPostal, PostalResult, Resolver};

use crate::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// Build the router with all routes and request tracing.
pub fn router(resolver: Resolver) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/postal/:postal_code", get(resolve_postal))
        .route("/cache/postal/:postal_code", get(cached_postal))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { resolver })
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(Health { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

/// GET /postal/:postal_code
async fn resolve_postal(
    State(state): State<AppState>, Path(postal_code): Path<String>,
) -> Result<Json<PostalResult>, ApiError> {
    let result = state.resolver.lookup_postal(&postal_code).await?;
    Ok(Json(result))
}

/// GET /cache/postal/:postal_code
async fn cached_postal(
    State(state): State<AppState>, Path(postal_code): Path<String>,
) -> Result<Json<CachedPostal>, ApiError> {
    let cached = state.resolver.cached_postal(&postal_code).await?;
    cached.map(Json).ok_or(ApiError::NotCached(postal_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (resolver, _db, _source) = testing::resolver(false).await;
        let (status, json) = get_json(router(resolver), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_resolve_postal_miss_then_hit() {
        let (resolver, db, source) = testing::resolver(false).await;

        let (status, json) = get_json(router(resolver.clone()), "/postal/k1a%200b1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["PostalCode"], "K1A0B1");
        assert_eq!(json["EIEconomicRegionName"], "Ottawa");
        assert_eq!(json["CacheHit"], false);
        assert_eq!(json["EconomicRegion"]["EconomicRegionCode"], "3520");
        assert_eq!(source.fetches(), 2);

        let (status, json) = get_json(router(resolver), "/postal/K1A0B1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["CacheHit"], true);
        assert_eq!(json["EconomicRegion"]["CacheHit"], true);
        assert_eq!(source.fetches(), 2);

        assert_eq!(db.postal_count().await.unwrap(), 1);
        assert_eq!(db.region_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_postal_invalid_input() {
        let (resolver, _db, _source) = testing::resolver(false).await;
        let (status, json) = get_json(router(resolver), "/postal/K1A-0B1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_INPUT");
        assert_eq!(json["kind"], "input");
    }

    #[tokio::test]
    async fn test_resolve_postal_fetch_failure() {
        let (resolver, _db, _source) = testing::resolver(true).await;
        let (status, json) = get_json(router(resolver), "/postal/K1A0B1").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], "HTTP_ERROR");
        assert_eq!(json["kind"], "fetch");
    }

    #[tokio::test]
    async fn test_resolve_postal_store_failure() {
        let (resolver, db, source) = testing::resolver(false).await;
        db.clone().close().await.unwrap();

        let (status, json) = get_json(router(resolver), "/postal/K1A0B1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["kind"], "store");
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn test_cached_postal_endpoint() {
        let (resolver, _db, source) = testing::resolver(false).await;

        let (status, json) = get_json(router(resolver.clone()), "/cache/postal/K1A0B1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "NOT_CACHED");

        resolver.lookup_postal("K1A0B1").await.unwrap();
        let fetches = source.fetches();

        let (status, json) = get_json(router(resolver), "/cache/postal/k1a0b1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["PostalCode"], "K1A0B1");
        assert_eq!(json["Stale"], false);
        assert_eq!(source.fetches(), fetches);
    }
}
