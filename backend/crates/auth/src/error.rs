//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// User name already exists
    #[error("Username already taken")]
    UserNameTaken,

    /// Email already registered
    #[error("User with this email already exists")]
    EmailTaken,

    /// Invalid credentials (unknown email or wrong password)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Session fingerprint mismatch
    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Request input failed validation (username, email, role)
    #[error("{0}")]
    Validation(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserNameTaken | AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => StatusCode::UNAUTHORIZED,
            AuthError::MissingHeader(_)
            | AuthError::Validation(_)
            | AuthError::PasswordValidation(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::MissingHeader(_)
            | AuthError::Validation(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::PasswordValidation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
