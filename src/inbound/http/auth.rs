use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use crate::domain::auth::credentials::{Credentials, CredentialsError};

fn auth_error(reason: &str) -> CredentialsError {
    CredentialsError::AuthError(reason.to_string())
}

/// Extracts `Basic` credentials from the `Authorization` header.
pub fn basic_authentication(headers: &HeaderMap) -> Result<Credentials, CredentialsError> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| auth_error("The 'Authorization' header is missing"))?
        .to_str()
        .map_err(|_| auth_error("The 'Authorization' header is not a valid UTF8 string."))?;
    let base64encoded_segment = header_value
        .strip_prefix("Basic ")
        .ok_or_else(|| auth_error("The authorization scheme was not 'Basic'"))?;
    let decoded_bytes = base64::decode_config(base64encoded_segment, base64::STANDARD)
        .map_err(|_| auth_error("Failed to base64-decode 'Basic' credentials"))?;
    let decoded_credentials = String::from_utf8(decoded_bytes)
        .map_err(|_| auth_error("The decoded credential string is not valid UTF8."))?;

    let (username, password) = decoded_credentials
        .split_once(':')
        .ok_or_else(|| auth_error("A password must be provided in 'Basic' auth."))?;
    if username.is_empty() {
        return Err(auth_error("A username must be provided in 'Basic' auth."));
    }

    Ok(Credentials::new(username.to_string(), password.to_string()))
}
