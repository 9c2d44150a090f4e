//! Error handling - every failure leaves a handler as exactly one envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use beacon_core::DomainError;
use beacon_core::domain::RateLimitDecision;
use beacon_shared::ApiError;
use beacon_shared::dto::WebhookErrorResponse;
use std::fmt;

use super::rate_limit::insert_rate_limit_headers;

/// Application-level error type for envelope endpoints.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized,
    RateLimited(RateLimitDecision),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::RateLimited(decision) => {
                write!(f, "Rate limited until {}", decision.reset_at_epoch_ms)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        let error = match self {
            AppError::BadRequest(detail) => ApiError::bad_request(detail),
            AppError::Unauthorized => ApiError::unauthorized(),
            AppError::RateLimited(decision) => {
                let retry_after = decision.retry_after_secs(chrono::Utc::now().timestamp_millis());
                insert_rate_limit_headers(&mut builder, decision);
                builder.insert_header(("Retry-After", retry_after.to_string()));
                ApiError::too_many_requests(retry_after)
            }
            AppError::Internal(detail) => {
                // Details stay in the logs
                tracing::error!("Internal error: {}", detail);
                ApiError::internal_error()
            }
        };

        builder.json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::MalformedPayload(msg) => AppError::Internal(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Errors of the CMS webhook, which answers `{ "error": ... }` instead of the envelope.
#[derive(Debug)]
pub enum WebhookError {
    InvalidSignature,
    Internal(String),
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::InvalidSignature => write!(f, "Invalid signature"),
            WebhookError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            WebhookError::InvalidSignature => {
                tracing::warn!("Rejected CMS webhook with invalid signature");
                WebhookErrorResponse::new("Invalid signature")
            }
            WebhookError::Internal(detail) => {
                tracing::error!("Webhook processing failed: {}", detail);
                WebhookErrorResponse::new("Error revalidating")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Internal(err.to_string())
    }
}

pub type WebhookResult<T> = Result<T, WebhookError>;
