use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::configuration::EmailVerifierSettings;
use crate::domain::lead::{
    models::{email::LeadEmail, verification::VerificationResult},
    ports::{EmailVerifier, EmailVerifierError},
};

/// Client for Hunter's `email-verifier` endpoint.
#[derive(Debug)]
pub struct HunterClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl HunterClient {
    const INVALID_STATUS: &'static str = "invalid";

    pub fn new(configuration: EmailVerifierSettings) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(configuration.timeout())
            .build()
            .context("Failed to build the verifier HTTP client")?;

        Ok(Self {
            http_client,
            base_url: configuration.base_url,
            api_key: configuration.api_key,
        })
    }
}

#[derive(serde::Deserialize)]
struct VerifierResponse {
    data: VerifierData,
}

#[derive(serde::Deserialize)]
struct VerifierData {
    status: String,
}

#[async_trait]
impl EmailVerifier for HunterClient {
    #[tracing::instrument(name = "Ask Hunter to verify an email", skip(self, email))]
    async fn verify(&self, email: &LeadEmail) -> Result<VerificationResult, EmailVerifierError> {
        let url = format!("{}/v2/email-verifier", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("email", email.as_ref()),
                ("api_key", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await
            .context("Failed to reach the verification service")?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(VerificationResult::Indeterminate(
                "verifier rate limited".into(),
            ));
        }
        if !status.is_success() {
            return Err(EmailVerifierError::UnexpectedStatus(status.as_u16()));
        }

        let body: VerifierResponse = response
            .json()
            .await
            .map_err(|e| EmailVerifierError::MalformedResponse(e.into()))?;
        tracing::debug!(status = %body.data.status, "Verification service answered");

        if body.data.status == Self::INVALID_STATUS {
            Ok(VerificationResult::Invalid)
        } else {
            Ok(VerificationResult::Valid)
        }
    }
}
