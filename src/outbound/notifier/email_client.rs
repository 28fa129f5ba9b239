use crate::configuration::EmailClientSettings;
use crate::domain::lead::{
    models::email::{EmailMessage, LeadEmail},
    ports::{LeadNotifier, LeadNotifierError},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for a Postmark-compatible HTTP email API.
///
/// Every lead goes from `sender` to the single operator `recipient`.
#[derive(Debug)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: LeadEmail,
    recipient: LeadEmail,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(configuration: EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender = configuration
            .sender()
            .context("Invalid sender email address")?;
        let recipient = configuration
            .recipient()
            .context("Invalid recipient email address")?;
        let http_client = Client::builder()
            .timeout(configuration.timeout())
            .build()
            .context("Failed to build the email HTTP client")?;

        Ok(Self {
            http_client,
            base_url: configuration.base_url,
            sender,
            recipient,
            authorization_token: configuration.authorization_token,
        })
    }
}

#[async_trait]
impl LeadNotifier for EmailClient {
    #[tracing::instrument(name = "Send lead email to the operator", skip(self, message))]
    async fn send_notification(&self, message: &EmailMessage) -> Result<(), LeadNotifierError> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: self.recipient.as_ref(),
            subject: message.subject_as_ref().as_ref(),
            text_body: message.text_as_ref().as_ref(),
        };

        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .context("Failed to reach the email API")?
            .error_for_status()
            .context("The email API rejected the message")?;

        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}
