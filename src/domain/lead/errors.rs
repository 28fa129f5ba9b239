use std::time::Duration;

use super::{
    models::submission::SubmissionError,
    ports::{EmailVerifierError, LeadNotifierError},
};
use crate::domain::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum LeadError {
    #[error("Submissions are currently suspended")]
    Unavailable,
    #[error("Too many requests from this client")]
    RateLimited { retry_after: Duration },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("The verification service rejected the email address")]
    InvalidEmail,
    #[error("Failed to verify the email address")]
    VerificationFailed(#[source] EmailVerifierError),
    #[error("Failed to dispatch the lead email")]
    DispatchFailed(#[source] LeadNotifierError),
}

impl std::fmt::Debug for LeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<SubmissionError> for LeadError {
    fn from(error: SubmissionError) -> Self {
        Self::ValidationError(error.to_string())
    }
}

impl From<EmailVerifierError> for LeadError {
    fn from(error: EmailVerifierError) -> Self {
        Self::VerificationFailed(error)
    }
}

impl From<LeadNotifierError> for LeadError {
    fn from(error: LeadNotifierError) -> Self {
        Self::DispatchFailed(error)
    }
}
