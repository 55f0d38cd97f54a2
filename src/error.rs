//! Domain error types for the OAR service.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Summary is empty after trimming
    #[error("summary cannot be blank")]
    BlankSummary,

    /// Outcome missing or not one of the known outcomes
    #[error("invalid outcome: {0}")]
    InvalidOutcome(String),

    /// Analysis not permitted for the test's outcome
    #[error("invalid analysis: {0}")]
    InvalidAnalysis(String),

    /// Resolution missing or not one of the known resolutions
    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    /// Client supplied a reserved top-level key
    #[error("'{0}' is reserved! Cannot use that key")]
    ReservedFieldConflict(String),

    /// Update or patch target does not exist
    #[error("test with ID: {0} does not exist")]
    RecordNotFound(i64),

    /// Query token could not be decoded
    #[error("malformed query token: {0}")]
    MalformedToken(String),

    /// Bulk mutation requested without a filter
    #[error("missing required filter: {0}")]
    MissingRequiredFilter(&'static str),

    /// Requested page size above the maximum
    #[error("maximum allowed limit is {max}, got {requested}")]
    LimitExceeded { requested: u64, max: u64 },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Stable machine-readable kind, returned alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BlankSummary => "BLANK_SUMMARY",
            AppError::InvalidOutcome(_) => "INVALID_OUTCOME",
            AppError::InvalidAnalysis(_) => "INVALID_ANALYSIS",
            AppError::InvalidResolution(_) => "INVALID_RESOLUTION",
            AppError::ReservedFieldConflict(_) => "RESERVED_FIELD_CONFLICT",
            AppError::RecordNotFound(_) => "RECORD_NOT_FOUND",
            AppError::MalformedToken(_) => "MALFORMED_TOKEN",
            AppError::MissingRequiredFilter(_) => "MISSING_REQUIRED_FILTER",
            AppError::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Database(_) => "STORE_FAILURE",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AppError::Database(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: message,
            kind: self.kind().to_string(),
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    pub kind: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
