//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Validation failed: {0}")]
    InvalidRequest(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status code
    pub error: String,
    /// Description of what went wrong
    pub message: String,
    /// When the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Domain(domain_err) => match domain_err {
                DomainError::DuplicateDocumentNumber(_) => StatusCode::CONFLICT,
                DomainError::AccountNotFound(_) => StatusCode::NOT_FOUND,
                DomainError::InvalidOperationType(_) => StatusCode::BAD_REQUEST,
                DomainError::InsufficientLimit { .. } => StatusCode::BAD_REQUEST,
            },
            AppError::Database(_) | AppError::Internal(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 5xx causes are logged; the client gets a generic message
        let message = if status.is_server_error() {
            match &self {
                AppError::Database(e) => tracing::error!("Database error: {:?}", e),
                AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
                AppError::Config(e) => tracing::error!("Config error: {:?}", e),
                _ => {}
            }
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ApiError::new(status, message);

        (status, Json(body)).into_response()
    }
}
