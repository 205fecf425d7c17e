//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message returned to the client for every server-side failure
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Invalid email or password")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error taxonomy visible to callers.
///
/// Several variants share a kind: a store failure and a hashing failure are
/// both `Internal`, a missing field and an unreadable body are both
/// `Validation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Auth,
    Internal,
}

impl AppError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorKind::Validation,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::InvalidCredentials => ErrorKind::Auth,
            AppError::Database(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get HTTP status code.
    ///
    /// Every client-caused failure is a 400, conflicts and bad credentials
    /// included.
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                SERVER_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                SERVER_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.user_message()).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Startup failure to reach the database.
    pub fn connection_failed(err: sea_orm::DbErr) -> Self {
        AppError::Internal(format!("Database connection failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("Email").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_message() {
        assert_eq!(AppError::conflict("Email").user_message(), "Email already exists");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::internal("connection refused on 10.0.0.3:5432");

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::from(sea_orm::DbErr::Custom("boom".to_string()));

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);
    }
}
