use anyhow::Context;
use contact_relay::configuration::get_configuration;
use contact_relay::domain::admission::rate_limiter::RateLimiter;
use contact_relay::domain::lead::ports::EmailVerifier;
use contact_relay::domain::lead::service::LeadRelay;
use contact_relay::inbound::http::Application;
use contact_relay::outbound::notifier::email_client::EmailClient;
use contact_relay::outbound::telemetry::init_logger;
use contact_relay::outbound::verifier::{HunterClient, NullVerifier};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger("contact-relay", &configuration.log_level(), std::io::stdout);

    let email_client = Arc::new(EmailClient::new(configuration.email_client)?);
    let verifier: Arc<dyn EmailVerifier> = if configuration.email_verifier.enabled {
        Arc::new(HunterClient::new(configuration.email_verifier)?)
    } else {
        tracing::warn!("Email verification is disabled, every address will be accepted");
        Arc::new(NullVerifier)
    };
    let rate_limiter = RateLimiter::new(
        configuration.rate_limit.max_requests,
        configuration.rate_limit.window(),
    )
    .context("Invalid rate limit configuration")?;

    let lead_service = LeadRelay::new(verifier, email_client, rate_limiter);
    let application = Application::build(lead_service, configuration.application).await?;
    tracing::info!(port = application.port(), "Contact relay listening");

    application.run_until_stopped().await?;
    Ok(())
}
