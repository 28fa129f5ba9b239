use super::email::{EmailError, LeadEmail};
use unicode_segmentation::UnicodeSegmentation;

/// The contact form payload as posted by the browser.
///
/// Every field is optional on the wire; [`Submission::try_from`] decides what
/// is actually required.
#[derive(serde::Deserialize, Debug, Default, Clone)]
pub struct SubmissionRequest {
    pub user_firstname: Option<String>,
    pub user_lasttname: Option<String>,
    pub user_objectives: Option<String>,
    pub user_email: Option<String>,
    pub user_phonenumber: Option<String>,
    pub user_response: Option<String>,
    pub user_plan: Option<String>,
    pub user_disponibility: Option<String>,
    pub user_found: Option<String>,
    pub message: Option<String>,
}

impl SubmissionRequest {
    /// Decodes a raw request body. Unknown fields are ignored.
    pub fn from_json(payload: &[u8]) -> Result<SubmissionRequest, SubmissionError> {
        serde_json::from_slice(payload).map_err(SubmissionError::MalformedPayload)
    }
}

#[cfg(test)]
impl SubmissionRequest {
    pub fn with_email(email: &str) -> SubmissionRequest {
        Self {
            user_email: Some(email.to_string()),
            ..Default::default()
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    #[error("The body is not a valid contact form payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("The email address is missing.")]
    MissingEmail,
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("The {field} field is too long (maximum allowed is {max} characters).")]
    FieldTooLong { field: &'static str, max: usize },
}

/// A free-text form value. Missing values render as an empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadField(String);

impl LeadField {
    const NAME_MAX_LENGTH: usize = 256;
    const TEXT_MAX_LENGTH: usize = 1000;
    const MESSAGE_MAX_LENGTH: usize = 5000;

    fn parse(
        value: Option<String>,
        field: &'static str,
        max: usize,
    ) -> Result<LeadField, SubmissionError> {
        let value = value.unwrap_or_default();
        if value.graphemes(true).count() > max {
            return Err(SubmissionError::FieldTooLong { field, max });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for LeadField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub first_name: LeadField,
    pub last_name: LeadField,
    pub objectives: LeadField,
    pub email: LeadEmail,
    pub phone_number: LeadField,
    pub response: LeadField,
    pub plan: LeadField,
    pub availability: LeadField,
    pub found_via: LeadField,
    pub message: LeadField,
}

impl TryFrom<SubmissionRequest> for Submission {
    type Error = SubmissionError;

    fn try_from(req: SubmissionRequest) -> Result<Self, Self::Error> {
        let email = req.user_email.ok_or(SubmissionError::MissingEmail)?;

        Ok(Self {
            first_name: LeadField::parse(
                req.user_firstname,
                "first name",
                LeadField::NAME_MAX_LENGTH,
            )?,
            last_name: LeadField::parse(
                req.user_lasttname,
                "last name",
                LeadField::NAME_MAX_LENGTH,
            )?,
            objectives: LeadField::parse(
                req.user_objectives,
                "objectives",
                LeadField::TEXT_MAX_LENGTH,
            )?,
            email: LeadEmail::parse(email.trim().to_string())?,
            phone_number: LeadField::parse(
                req.user_phonenumber,
                "phone number",
                LeadField::NAME_MAX_LENGTH,
            )?,
            response: LeadField::parse(
                req.user_response,
                "response",
                LeadField::TEXT_MAX_LENGTH,
            )?,
            plan: LeadField::parse(req.user_plan, "plan", LeadField::TEXT_MAX_LENGTH)?,
            availability: LeadField::parse(
                req.user_disponibility,
                "availability",
                LeadField::TEXT_MAX_LENGTH,
            )?,
            found_via: LeadField::parse(
                req.user_found,
                "referral source",
                LeadField::TEXT_MAX_LENGTH,
            )?,
            message: LeadField::parse(req.message, "message", LeadField::MESSAGE_MAX_LENGTH)?,
        })
    }
}
