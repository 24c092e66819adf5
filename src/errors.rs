//! # Record Errors
//!
//! Error taxonomy shared by the query engine, the mutation engine and the
//! HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::envelope::Envelope;
use crate::store::StoreError;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record query and mutation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed pagination, sort, filter or key input
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Caller identity missing
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller lacks the privilege for this operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Record key absent
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Record key already taken
    #[error("Record already exists: {0}")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Underlying store failed
    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl RecordError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            RecordError::Unauthenticated => StatusCode::UNAUTHORIZED,
            RecordError::Forbidden(_) => StatusCode::FORBIDDEN,
            RecordError::NotFound(_) => StatusCode::NOT_FOUND,
            RecordError::Conflict(_) => StatusCode::CONFLICT,
            RecordError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for an `InvalidParameter` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        RecordError::InvalidParameter(msg.into())
    }
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(key) => RecordError::Conflict(key),
            other => RecordError::StoreFailure(other.to_string()),
        }
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(Envelope::<()>::error(self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RecordError::invalid("pageSize").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RecordError::NotFound("a/b".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RecordError::Conflict("a/b".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RecordError::StoreFailure("disk".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_duplicate_becomes_conflict() {
        let err = RecordError::from(StoreError::Duplicate("alice/login".to_string()));
        assert_eq!(err, RecordError::Conflict("alice/login".to_string()));
    }

    #[test]
    fn test_store_io_becomes_store_failure() {
        let err = RecordError::from(StoreError::LockPoisoned);
        assert!(matches!(err, RecordError::StoreFailure(_)));
    }
}
