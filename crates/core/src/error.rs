//! Unified error types for eiregion.
//!
//! Every variant belongs to one of three kinds (see [`ErrorKind`]) so callers
//! can tell a cache failure apart from a failure to retrieve fresh data.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use serde::Serialize;
use tokio_rusqlite::rusqlite;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself was rejected before any I/O.
    Input,
    /// Reading from or writing to the cache store failed.
    Store,
    /// The remote source could not produce fresh data.
    Fetch,
}

/// Unified error types for the eiregion service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty postal code).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A locator could not be turned into a fetchable URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Network failure or non-success HTTP status.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Page was fetched but a row could not be read from it.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// Page was fetched but holds no data row at all.
    #[error("NO_MATCHING_ROW: {0}")]
    NoMatchingRow(String),
}

impl Error {
    /// Classify this error for callers that only care about where it came from.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::Input,
            Error::Database(_) | Error::MigrationFailed(_) => ErrorKind::Store,
            Error::InvalidUrl(_)
            | Error::FetchTimeout(_)
            | Error::FetchTooLarge(_)
            | Error::HttpError(_)
            | Error::ExtractFailed(_)
            | Error::NoMatchingRow(_) => ErrorKind::Fetch,
        }
    }

    /// Stable machine-readable code, matching the message prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Database(_) | Error::MigrationFailed(_) => "STORE_ERROR",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::FetchTimeout(_) => "FETCH_TIMEOUT",
            Error::FetchTooLarge(_) => "FETCH_TOO_LARGE",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::ExtractFailed(_) => "EXTRACT_FAILED",
            Error::NoMatchingRow(_) => "NO_MATCHING_ROW",
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::Database(_) | Error::MigrationFailed(_) => -32002,
            Error::InvalidUrl(_) => -32003,
            Error::FetchTimeout(_) => -32006,
            Error::FetchTooLarge(_) => -32007,
            Error::HttpError(_) => -32008,
            Error::ExtractFailed(_) => -32000,
            Error::NoMatchingRow(_) => -32001,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
