//! Centralized error handling for the reputation engine and its API
//!
//! `InvalidRecordError` is raised by the engine itself when input records
//! cannot be scored safely. `ApiError` maps every failure onto an HTTP status
//! code and a JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A payment record or derived payment metric that would corrupt scoring
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidRecordError {
    #[error("record {index}: amount must not be negative (got {amount})")]
    NegativeAmount { index: usize, amount: String },

    #[error("record {index}: paid_at precedes created_at")]
    PaidBeforeCreated { index: usize },

    #[error("record {index}: {field} address is empty")]
    MissingAddress { index: usize, field: &'static str },

    #[error("record {index}: {field} is not a finite number")]
    NonFinite { index: usize, field: &'static str },

    #[error("record {index}: {field} must not be negative")]
    NegativeMetric { index: usize, field: &'static str },
}

impl InvalidRecordError {
    /// Position of the offending entry in the caller's input
    pub fn index(&self) -> usize {
        match self {
            InvalidRecordError::NegativeAmount { index, .. }
            | InvalidRecordError::PaidBeforeCreated { index }
            | InvalidRecordError::MissingAddress { index, .. }
            | InvalidRecordError::NonFinite { index, .. }
            | InvalidRecordError::NegativeMetric { index, .. } => *index,
        }
    }
}

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid payment record: {0}")]
    InvalidRecord(#[from] InvalidRecordError),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in the response
#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidRecord(_) => "INVALID_RECORD",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::InvalidRecord(err) => Some(format!("record_index={}", err.index())),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::debug!(error = %message, code = %error_code, "Client error occurred");

        let body = ErrorResponse {
            error: ErrorDetails {
                code: error_code.to_string(),
                details: self.details(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}
