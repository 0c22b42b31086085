//! Unified error handling
//!
//! Application-level error type and its HTTP rendering:
//! - [`AppError`] - application error enum
//! - [`AppResult`] - handler result alias
//!
//! Every variant maps to one of the stable `Exxxx` codes in
//! [`shared::ApiErrorCode`]; the response body is the shared envelope.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use shared::{ApiErrorCode, ApiResponse};
use tracing::error;

use crate::db::repository::RepoError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    fn code(&self) -> ApiErrorCode {
        match self {
            Self::NotFound(_) => ApiErrorCode::NotFound,
            Self::Conflict(_) => ApiErrorCode::Conflict,
            Self::Validation(_) => ApiErrorCode::Validation,
            Self::BusinessRule(_) => ApiErrorCode::BusinessRule,
            Self::Database(_) => ApiErrorCode::Database,
            Self::Internal(_) => ApiErrorCode::Internal,
            Self::Invalid(_) => ApiErrorCode::Invalid,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        // Internal detail stays in the logs, not in the response body
        let message = match &self {
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                code.default_message().to_string()
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                code.default_message().to_string()
            }
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg)
            | AppError::BusinessRule(msg)
            | AppError::Invalid(msg) => msg.clone(),
        };

        let body: ApiResponse<()> = ApiResponse::error(code.code(), message);
        (code.status_code(), Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_to_app_errors() {
        let err: AppError = RepoError::NotFound("recipe x".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = RepoError::Duplicate("ingredient y".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let resp = AppError::database("connection refused at 10.0.0.1").into_response();
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
