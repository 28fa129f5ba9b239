use std::time::Duration;

use crate::domain::auth::credentials::CredentialsError;
use crate::domain::error_chain_fmt;
use crate::domain::lead::errors::LeadError;

use actix_web::http::header;
use actix_web::HttpResponse;
use actix_web::{http::StatusCode, ResponseError};

const GONE_MESSAGE: &str = "The resource is currently unavailable.";
const RATE_LIMITED_MESSAGE: &str =
    "The resource is currently unavailable due to too many requests.";
const GONE_ERROR: &str = "Resource gone temporarily. You might try again later.";
const INVALID_EMAIL_MESSAGE: &str = "The provided email address is invalid.";
const INVALID_EMAIL_ERROR: &str = "Invalid email detected";
const INVALID_EMAIL_SUGGESTION: &str = "Please provide a valid email address.";
const SERVER_ERROR_MESSAGE: &str = "Server error";
const SERVER_ERROR_DETAIL: &str = "An unexpected error occurred. Please try again later.";

#[derive(thiserror::Error)]
pub enum AppError {
    #[error("Submissions are suspended")]
    Unavailable,
    #[error("Too many requests, retry after {retry_after:?}")]
    TooManyRequests { retry_after: Duration },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid email detected")]
    InvalidEmail,
    #[error("Not authenticated: {0}")]
    AuthError(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<LeadError> for AppError {
    fn from(error: LeadError) -> Self {
        match error {
            LeadError::Unavailable => AppError::Unavailable,
            LeadError::RateLimited { retry_after } => AppError::TooManyRequests { retry_after },
            LeadError::ValidationError(s) => AppError::ValidationError(s),
            LeadError::InvalidEmail => AppError::InvalidEmail,
            error @ (LeadError::VerificationFailed(_) | LeadError::DispatchFailed(_)) => {
                AppError::Unexpected(anyhow::Error::new(error))
            }
        }
    }
}

impl From<CredentialsError> for AppError {
    fn from(error: CredentialsError) -> Self {
        match error {
            CredentialsError::AuthError(s) => AppError::AuthError(s),
            CredentialsError::Unexpected(e) => AppError::Unexpected(e),
        }
    }
}

#[derive(serde::Serialize)]
pub struct MessageBody<'a> {
    pub message: &'a str,
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

impl<'a> ErrorBody<'a> {
    fn new(message: &'a str, error: &'a str) -> Self {
        Self {
            message,
            error,
            suggestion: None,
        }
    }

    fn with_suggestion(self, suggestion: &'a str) -> Self {
        Self {
            suggestion: Some(suggestion),
            ..self
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unavailable => StatusCode::GONE,
            AppError::TooManyRequests { .. } => StatusCode::GONE,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidEmail => StatusCode::NOT_FOUND,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Unavailable => response.json(ErrorBody::new(GONE_MESSAGE, GONE_ERROR)),
            AppError::TooManyRequests { retry_after } => response
                .insert_header((header::RETRY_AFTER, retry_after.as_secs().max(1)))
                .json(ErrorBody::new(RATE_LIMITED_MESSAGE, GONE_ERROR)),
            AppError::ValidationError(detail) => {
                response.json(ErrorBody::new("The submission is malformed.", detail))
            }
            AppError::InvalidEmail => response.json(
                ErrorBody::new(INVALID_EMAIL_MESSAGE, INVALID_EMAIL_ERROR)
                    .with_suggestion(INVALID_EMAIL_SUGGESTION),
            ),
            AppError::AuthError(_) => response
                .insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="admin""#))
                .json(ErrorBody::new(
                    "Authentication required.",
                    "Invalid or missing credentials",
                )),
            // The cause chain goes to the logs, never to the caller.
            AppError::Unexpected(_) => {
                response.json(ErrorBody::new(SERVER_ERROR_MESSAGE, SERVER_ERROR_DETAIL))
            }
        }
    }
}
