//! HTTP error taxonomy
//!
//! Every failure a request can hit maps to exactly one variant, and every
//! variant maps to one fixed status code and `kind` tag.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use verbatim_query::QueryError;
use verbatim_store::StoreError;

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Stable machine-readable error kind
    pub kind: String,
}

/// Application error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, empty or malformed input
    #[error("{0}")]
    InvalidInput(String),

    /// Input present but of the wrong type
    #[error("{0}")]
    InvalidType(String),

    /// Value already exists
    #[error("{0}")]
    Conflict(String),

    /// No record for the requested value
    #[error("{0}")]
    NotFound(String),

    /// Natural-language query matched no rule
    #[error("{0}")]
    ParseFailure(String),

    /// Interpreted filters cannot all hold at once
    #[error("{0}")]
    ConflictingFilters(String),

    /// Unexpected failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::ParseFailure(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidType(_) | ApiError::ConflictingFilters(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable tag
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::InvalidType(_) => "invalid_type",
            ApiError::Conflict(_) => "conflict",
            ApiError::NotFound(_) => "not_found",
            ApiError::ParseFailure(_) => "parse_failure",
            ApiError::ConflictingFilters(_) => "conflicting_filters",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        });
        (status, body).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::UnknownParameter(_)
            | QueryError::InvalidParameter { .. }
            | QueryError::EmptyQuery => ApiError::InvalidInput(e.to_string()),
            QueryError::ParseFailure(_) => ApiError::ParseFailure(e.to_string()),
            QueryError::ConflictingFilters { .. } => ApiError::ConflictingFilters(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_errors_keep_their_kind() {
        let parse: ApiError = QueryError::ParseFailure("fox".to_string()).into();
        let conflict: ApiError = QueryError::ConflictingFilters {
            min_length: 11,
            max_length: 4,
        }
        .into();
        let unknown: ApiError = QueryError::UnknownParameter("colour".to_string()).into();

        assert_eq!(parse.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse.kind(), "parse_failure");
        assert_eq!(conflict.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(conflict.kind(), "conflicting_filters");
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown.kind(), "invalid_input");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err: ApiError = StoreError::Corrupt {
            key: "k".to_string(),
            reason: "bad".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
