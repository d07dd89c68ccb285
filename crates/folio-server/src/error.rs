//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. The response body is always
//! `{"error": <kind>, "message": <text>}`; internal failures are logged and
//! answered with a generic message.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use folio_core::errors::CoreError;
use folio_db::error::DatabaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request body.
    #[error("{0}")]
    BadRequest(String),

    /// No caller identity on a route that needs one.
    #[error("missing or empty {} header", crate::extract::CALLER_HEADER)]
    Unauthenticated,

    /// A server-side fault outside the database, e.g. a route wired to
    /// the wrong extractor.
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Database(DatabaseError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Database(DatabaseError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            Self::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Database(DatabaseError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Internal(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) | Self::Database(DatabaseError::Validation(_)) => "validation",
            Self::Unauthenticated => "unauthenticated",
            Self::Database(DatabaseError::Forbidden { .. }) => "forbidden",
            Self::Database(DatabaseError::NotFound { .. }) => "not_found",
            Self::Database(DatabaseError::Conflict(_)) => "conflict",
            Self::Internal(_) | Self::Database(_) => "internal",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        if rejection.status().is_server_error() {
            Self::Internal(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self::Database(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
            self.to_string()
        };
        let body = ErrorBody {
            error: self.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
