use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("user not found")]
    NotFound,
    /// Unique constraint violation (duplicate email).
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Store(sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            // Duplicate emails are reported like any other store failure.
            ApiError::Conflict(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return ApiError::Conflict(db_err.message().to_string());
            }
        }
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Conflict(msg) => warn!(error = %msg, "unique constraint violated"),
            ApiError::Store(e) => error!(error = %e, "store error"),
            other => warn!(error = %other, %status, "request rejected"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
