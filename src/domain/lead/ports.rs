use async_trait::async_trait;

use super::{
    errors::LeadError,
    models::{
        email::{EmailError, EmailMessage, LeadEmail},
        verification::VerificationResult,
    },
};
use crate::domain::admission::client::ClientIdentity;

#[async_trait]
/// Asks a third party whether an address can receive mail.
pub trait EmailVerifier: Send + Sync + 'static {
    /// Performs a single lookup. Implementations must not retry.
    async fn verify(&self, email: &LeadEmail) -> Result<VerificationResult, EmailVerifierError>;
}

#[derive(thiserror::Error, Debug)]
pub enum EmailVerifierError {
    #[error("Verification service answered with status {0}")]
    UnexpectedStatus(u16),

    #[error("Verification service sent a malformed response")]
    MalformedResponse(#[source] anyhow::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
/// Hands a rendered lead to the outbound mail transport.
pub trait LeadNotifier: Send + Sync + 'static {
    async fn send_notification(&self, message: &EmailMessage) -> Result<(), LeadNotifierError>;
}

#[derive(thiserror::Error, Debug)]
pub enum LeadNotifierError {
    #[error("Validation error: {0}")]
    InvalidEmailMessage(#[from] EmailError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait LeadService: Send + Sync + 'static {
    /// Runs one raw request body through admission, validation, verification
    /// and dispatch. Admission is decided before the body is looked at.
    async fn submit(&self, payload: &[u8], client: &ClientIdentity) -> Result<(), LeadError>;

    /// Stops accepting submissions until restart. Returns `true` if this call
    /// changed the state.
    fn suspend(&self) -> bool;

    fn is_accepting(&self) -> bool;
}
