//! Error types shared by both services
//!
//! `StoreError` covers everything that can go wrong inside the embedded
//! database. `ApiError` is what handlers return; it knows how to turn itself
//! into an HTTP response with a JSON body of the form `{"error": "..."}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of every error response
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures raised by the storage layer
///
/// A missing record is never a `StoreError`; lookups report absence through
/// `Option`/`bool` return values instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("unique constraint violated: {table}.{column} = {value:?}")]
    UniqueViolation {
        table: &'static str,
        column: &'static str,
        value: String,
    },
}

// redb reports each stage with its own error type; fold them all into
// `redb::Error` so `?` works across a whole transaction.
macro_rules! from_redb {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(err: $ty) -> Self {
                    StoreError::Database(err.into())
                }
            }
        )*
    };
}

from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Error returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or semantically invalid request input
    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    /// The addressed record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Every short ID candidate collided with an existing one
    #[error("Failed to generate unique short ID")]
    ShortIdExhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Domain-level validation failure (422)
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ShortIdExhausted | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::Validation { message, .. } => {
                tracing::debug!(%status, "rejected request: {}", message);
                message.clone()
            }
            ApiError::NotFound(_) => {
                tracing::debug!("{}", self);
                self.to_string()
            }
            ApiError::ShortIdExhausted => {
                tracing::error!("{}", self);
                self.to_string()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("Item").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::ShortIdExhausted.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::invalid("title must not be empty").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let unique = StoreError::UniqueViolation {
            table: "urls",
            column: "short_id",
            value: "abc123".to_string(),
        };
        assert_eq!(
            ApiError::from(unique).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::NotFound("URL").to_string(), "URL not found");
        assert_eq!(ApiError::NotFound("Item").to_string(), "Item not found");
    }
}
