use crate::outbound::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use secrecy::{ExposeSecret, Secret};

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("Authentication failed: {0}")]
    AuthError(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Credentials presented by a caller.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: Secret<String>,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self {
            username,
            password: Secret::new(password),
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

/// The operator account allowed to perform administrative actions. The
/// password is only known as an argon2 PHC string.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Secret<String>,
}

impl AdminCredentials {
    pub fn new(username: String, password_hash: Secret<String>) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Without a configured hash administrative access is disabled.
    pub fn is_enabled(&self) -> bool {
        !self.password_hash.expose_secret().is_empty()
    }

    #[tracing::instrument(name = "Validate admin credentials", skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn validate(&self, credentials: Credentials) -> Result<(), CredentialsError> {
        if !self.is_enabled() {
            return Err(CredentialsError::AuthError(
                "Administrative access is disabled.".into(),
            ));
        }
        let username_matches = credentials.username == self.username;

        // The hash is checked even for an unknown username so both paths cost the same.
        let password_hash = self.password_hash.clone();
        spawn_blocking_with_tracing(move || verify_password_hash(password_hash, credentials.password))
            .await
            .context("Failed to spawn a blocking task.")??;

        if !username_matches {
            return Err(CredentialsError::AuthError("Unknown username.".into()));
        }
        Ok(())
    }
}

#[tracing::instrument(name = "Verify password hash", skip(expected_password_hash, password_candidate))]
fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), CredentialsError> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .map_err(|_| CredentialsError::AuthError("Invalid password.".into()))
}
