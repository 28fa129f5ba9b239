use validator::validate_email;

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct LeadEmail(String);

impl LeadEmail {
    pub fn parse(s: String) -> Result<LeadEmail, EmailError> {
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(EmailError::InvalidAddress(format!(
                "{} is not a valid email",
                s
            )))
        }
    }
}

impl AsRef<str> for LeadEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LeadEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<LeadEmail> for String {
    fn from(email: LeadEmail) -> Self {
        email.0
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Invalid email subject {0}")]
    InvalidSubject(String),
    #[error("Invalid email text content: {0}")]
    InvalidTextContent(String),
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A plain-text message ready to be handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailMessage {
    subject: EmailSubject,
    text_content: EmailTextContent,
}

impl EmailMessage {
    pub fn new(subject: EmailSubject, text_content: EmailTextContent) -> Self {
        Self {
            subject,
            text_content,
        }
    }
    pub fn subject_as_ref(&self) -> &EmailSubject {
        &self.subject
    }
    pub fn text_as_ref(&self) -> &EmailTextContent {
        &self.text_content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailSubject(String);

impl TryFrom<String> for EmailSubject {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(EmailError::InvalidSubject(
                "EmailSubject cannot be empty.".into(),
            ));
        }
        // A line break in the subject would leak into the message headers.
        if value.contains(['\r', '\n']) {
            return Err(EmailError::InvalidSubject(
                "EmailSubject cannot span multiple lines.".into(),
            ));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for EmailSubject {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EmailSubject::try_from(value.to_string())
    }
}

impl AsRef<str> for EmailSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailTextContent(String);

impl TryFrom<String> for EmailTextContent {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.is_empty() {
            Ok(Self(value))
        } else {
            Err(EmailError::InvalidTextContent(
                "EmailTextContent cannot be empty.".into(),
            ))
        }
    }
}

impl TryFrom<&str> for EmailTextContent {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EmailTextContent::try_from(value.to_string())
    }
}

impl AsRef<str> for EmailTextContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
