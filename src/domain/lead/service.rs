use std::sync::Arc;

use async_trait::async_trait;

use super::{
    errors::LeadError,
    models::{
        message,
        submission::{Submission, SubmissionRequest},
        verification::VerificationResult,
    },
    ports::{EmailVerifier, LeadNotifier, LeadNotifierError, LeadService},
};
use crate::domain::admission::{
    availability::ServiceAvailability,
    client::ClientIdentity,
    rate_limiter::{RateLimitDecision, RateLimiter},
};

/// Relays contact form submissions to the operator's inbox.
pub struct LeadRelay<V, N>
where
    V: EmailVerifier + ?Sized,
    N: LeadNotifier + ?Sized,
{
    verifier: Arc<V>,
    notifier: Arc<N>,
    rate_limiter: RateLimiter,
    availability: ServiceAvailability,
}

impl<V, N> LeadRelay<V, N>
where
    V: EmailVerifier + ?Sized,
    N: LeadNotifier + ?Sized,
{
    pub fn new(verifier: Arc<V>, notifier: Arc<N>, rate_limiter: RateLimiter) -> Self {
        Self {
            verifier,
            notifier,
            rate_limiter,
            availability: ServiceAvailability::new(),
        }
    }

    fn admit(&self, client: &ClientIdentity) -> Result<(), LeadError> {
        if let RateLimitDecision::Deny { retry_after } = self.rate_limiter.check(client) {
            tracing::info!("Submission rejected: rate limit exceeded");
            return Err(LeadError::RateLimited { retry_after });
        }
        if self.availability.is_suspended() {
            tracing::info!("Submission rejected: service suspended");
            return Err(LeadError::Unavailable);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Verify lead email", skip(self, submission))]
    async fn verify(&self, submission: &Submission) -> Result<(), LeadError> {
        match self.verifier.verify(&submission.email).await {
            Ok(VerificationResult::Invalid) => {
                tracing::info!("Submission rejected: email reported invalid");
                Err(LeadError::InvalidEmail)
            }
            Ok(VerificationResult::Indeterminate(reason)) => {
                tracing::warn!(
                    reason = %reason,
                    "Email verification unavailable, proceeding without it"
                );
                Ok(())
            }
            Ok(VerificationResult::Valid) => Ok(()),
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Email verification failed");
                Err(LeadError::VerificationFailed(error))
            }
        }
    }

    #[tracing::instrument(name = "Dispatch lead email", skip(self, submission))]
    async fn dispatch(&self, submission: &Submission) -> Result<(), LeadError> {
        let message = message::render(submission).map_err(LeadNotifierError::from)?;
        if let Err(error) = self.notifier.send_notification(&message).await {
            tracing::error!(error.cause_chain = ?error, "Failed to dispatch lead email");
            return Err(LeadError::DispatchFailed(error));
        }
        Ok(())
    }
}

#[async_trait]
impl<V, N> LeadService for LeadRelay<V, N>
where
    V: EmailVerifier + ?Sized,
    N: LeadNotifier + ?Sized,
{
    #[tracing::instrument(name = "Relay a lead submission", skip(self, payload))]
    async fn submit(&self, payload: &[u8], client: &ClientIdentity) -> Result<(), LeadError> {
        self.admit(client)?;

        let submission = SubmissionRequest::from_json(payload)
            .and_then(Submission::try_from)
            .map_err(|e| {
                tracing::info!(error = %e, "Submission rejected: validation failed");
                LeadError::from(e)
            })?;

        self.verify(&submission).await?;
        self.dispatch(&submission).await?;

        tracing::info!("Lead email dispatched");
        Ok(())
    }

    fn suspend(&self) -> bool {
        let changed = self.availability.suspend();
        if changed {
            tracing::warn!("Submissions suspended until restart");
        }
        changed
    }

    fn is_accepting(&self) -> bool {
        !self.availability.is_suspended()
    }
}
