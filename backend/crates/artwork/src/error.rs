//! Artwork Error Types
//!
//! This module provides artwork-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde_json::json;
use thiserror::Error;

/// Artwork-specific result type alias
pub type ArtworkResult<T> = Result<T, ArtworkError>;

/// Artwork-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// Request input failed validation (missing file, bad id, non-positive price, ...)
    #[error("{0}")]
    Validation(String),

    /// Artwork not found
    #[error("Artwork not found")]
    NotFound,

    /// Caller is not allowed to perform this operation on the artwork
    #[error("{0}")]
    Forbidden(String),

    /// An artwork with the same content hash is already registered
    #[error("This artwork has already been registered")]
    DuplicateArtwork,

    /// The buyer already purchased this artwork
    #[error("You have already purchased this artwork")]
    AlreadyPurchased,

    /// The artwork is not listed for sale (or has no positive price)
    #[error("This artwork is not available for purchase")]
    NotAvailable,

    /// Buyer account balance is below the sale price
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: f64, available: f64 },

    /// Ledger transfer failed after all preconditions passed
    #[error("Payment failed: {0}")]
    Payment(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArtworkError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ArtworkError::Validation(_) => StatusCode::BAD_REQUEST,
            ArtworkError::NotFound => StatusCode::NOT_FOUND,
            ArtworkError::Forbidden(_) => StatusCode::FORBIDDEN,
            ArtworkError::DuplicateArtwork
            | ArtworkError::AlreadyPurchased
            | ArtworkError::NotAvailable => StatusCode::CONFLICT,
            ArtworkError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
            ArtworkError::Payment(_) => StatusCode::BAD_GATEWAY,
            ArtworkError::Database(_) | ArtworkError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArtworkError::Validation(_) => ErrorKind::BadRequest,
            ArtworkError::NotFound => ErrorKind::NotFound,
            ArtworkError::Forbidden(_) => ErrorKind::Forbidden,
            ArtworkError::DuplicateArtwork
            | ArtworkError::AlreadyPurchased
            | ArtworkError::NotAvailable => ErrorKind::Conflict,
            ArtworkError::InsufficientFunds { .. } => ErrorKind::PaymentRequired,
            ArtworkError::Payment(_) => ErrorKind::BadGateway,
            ArtworkError::Database(_) | ArtworkError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ArtworkError::Database(e) => {
                tracing::error!(error = %e, "artwork database error");
            }
            ArtworkError::Internal(msg) => {
                tracing::error!(message = %msg, "artwork internal error");
            }
            ArtworkError::Payment(msg) => {
                tracing::error!(message = %msg, "ledger payment failure");
            }
            ArtworkError::DuplicateArtwork => {
                tracing::warn!("duplicate artwork registration attempt");
            }
            ArtworkError::Forbidden(msg) => {
                tracing::warn!(message = %msg, "forbidden artwork operation");
            }
            _ => {
                tracing::debug!(error = %self, "artwork error");
            }
        }
    }
}

impl From<ArtworkError> for AppError {
    fn from(err: ArtworkError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for ArtworkError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        // Client errors carry the message; server errors get a generic body
        // so that internal details never leak.
        let message = if status.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(
            ArtworkError::Validation("no file".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ArtworkError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ArtworkError::Forbidden("not the owner".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ArtworkError::DuplicateArtwork.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ArtworkError::AlreadyPurchased.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ArtworkError::NotAvailable.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ArtworkError::InsufficientFunds {
                required: 10.0,
                available: 5.0
            }
            .status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ArtworkError::Payment("transfer rejected".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ArtworkError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn converts_to_app_error_with_matching_kind() {
        let err: AppError = ArtworkError::NotAvailable.into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "This artwork is not available for purchase");
    }

    #[test]
    fn insufficient_funds_message_names_both_amounts() {
        let err = ArtworkError::InsufficientFunds {
            required: 25.0,
            available: 12.5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: required 25, available 12.5"
        );
    }
}
