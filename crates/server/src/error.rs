//! Structured errors for the HTTP boundary.
//!
//! Every failure is rendered as `{"code", "kind", "message"}` with a status
//! chosen by the error's kind.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eiregion_core::{Error, ErrorKind};
use serde::Serialize;

/// Errors returned by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A lookup failed in the resolver, store or remote source.
    #[error(transparent)]
    Lookup(#[from] Error),

    /// Nothing is stored for the requested postal code.
    #[error("NOT_CACHED: {0}")]
    NotCached(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl ApiError {
    /// HTTP status for this error: input 400, store 500, fetch 502, not cached 404.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Lookup(err) => match err.kind() {
                ErrorKind::Input => StatusCode::BAD_REQUEST,
                ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::Fetch => StatusCode::BAD_GATEWAY,
            },
            ApiError::NotCached(_) => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Lookup(err) => ErrorBody { code: err.code(), kind: Some(err.kind()), message: err.to_string() },
            ApiError::NotCached(_) => ErrorBody { code: "NOT_CACHED", kind: None, message: self.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, status = status.as_u16(), "lookup failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_by_kind() {
        assert_eq!(ApiError::from(Error::InvalidInput("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(Error::MigrationFailed("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::from(Error::HttpError("x".into())).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::from(Error::NoMatchingRow("x".into())).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::NotCached("K1A0B1".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_body_fields() {
        let body = ApiError::from(Error::FetchTimeout("slow".into())).body();
        assert_eq!(body.code, "FETCH_TIMEOUT");
        assert_eq!(body.kind, Some(ErrorKind::Fetch));
        assert_eq!(body.message, "FETCH_TIMEOUT: slow");

        let json = serde_json::to_value(ApiError::NotCached("K1A0B1".into()).body()).unwrap();
        assert_eq!(json["code"], "NOT_CACHED");
        assert!(json.get("kind").is_none());
    }
}
