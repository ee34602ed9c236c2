//! Unified error handling
//!
//! `ValidationError` and `GenerationError` are the two failure families of the
//! strategy flow; `ApiError` turns either into a consistent JSON response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Shown to users whenever generation fails, whatever the underlying cause.
pub const GENERATION_FAILED_MESSAGE: &str = "We could not process the strategy. This usually \
happens during a demand peak or when the profile lacks enough detail. Please check your \
connection and try again.";

/// Profile rejected before anything is sent to the AI service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select at least one strategic goal.")]
    NoGoals,

    #[error("Please indicate the size of the organization.")]
    MissingSize,

    #[error("The field '{0}' is required.")]
    MissingField(&'static str),
}

/// Failure of the single generation round trip.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("empty reply from AI service")]
    EmptyReply,

    #[error("malformed JSON in AI reply: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("invalid report shape: {0}")]
    InvalidShape(String),

    #[error("AI service unavailable: {0}")]
    Transport(String),

    #[error("AI service returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Generation(_) => "GENERATION_FAILED",
        }
    }

    /// Message safe to show to the user.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Validation(e) => e.to_string(),
            // Parse errors and upstream details stay in the logs
            Self::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
        }
    }

    /// Tags the error with the id of the request that produced it.
    pub fn for_request(self, request_id: Option<&str>) -> RequestError {
        RequestError {
            error: self,
            request_id: request_id.map(str::to_string),
        }
    }
}

/// An `ApiError` whose response body carries the request id.
#[derive(Debug)]
pub struct RequestError {
    pub error: ApiError,
    pub request_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.for_request(None).into_response()
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let Self { error, request_id } = self;
        match &error {
            // Already logged with its cause at the submission point
            ApiError::Generation(e) => {
                tracing::debug!(error = %e, "Responding with generation failure");
            }
            _ => {
                tracing::warn!(
                    error = %error,
                    request_id = request_id.as_deref().unwrap_or("-"),
                    "API error"
                );
            }
        }

        let status = error.status_code();
        let body = ErrorResponse {
            code: error.error_code().to_string(),
            message: error.public_message(),
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Result for handlers that echo the request id in error bodies.
pub type RequestResult<T> = Result<T, RequestError>;
