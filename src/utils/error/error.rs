//! Error handling for the analytics service
//!
//! This module defines all error types used throughout the service.

#![allow(missing_docs)]

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the analytics service
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Main error type for the analytics service
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tenant could not be identified or the credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request payload or query failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found errors
    #[error("{0}")]
    NotFound(String),

    /// Rate limiting errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AnalyticsError {
    /// HTTP status and stable error code for this error
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AnalyticsError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AnalyticsError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AnalyticsError::Serialization(_) => (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR"),
            AnalyticsError::Yaml(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AnalyticsError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            AnalyticsError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AnalyticsError::Jwt(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AnalyticsError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AnalyticsError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AnalyticsError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AnalyticsError::RateLimit(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            AnalyticsError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to return to a client
    fn public_message(&self) -> String {
        match self {
            AnalyticsError::Database(_) => "Database operation failed".to_string(),
            AnalyticsError::Jwt(_) => "Unauthorized: invalid bearer token".to_string(),
            AnalyticsError::Config(_)
            | AnalyticsError::Yaml(_)
            | AnalyticsError::Io(_)
            | AnalyticsError::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for AnalyticsError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        self.response_with_request_id(None)
    }
}

impl AnalyticsError {
    /// Error envelope tagged with the id of the failed request
    pub fn response_with_request_id(&self, request_id: Option<String>) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.public_message(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

/// Helper functions for creating specific errors
impl AnalyticsError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
