use super::{
    email::{EmailError, EmailMessage, EmailSubject, EmailTextContent},
    submission::Submission,
};

pub const LEAD_SUBJECT: &str = "New client lead";

/// Renders a submission as the plain-text notification sent to the operator.
///
/// Lines always appear in the same order and values are copied verbatim.
pub fn render(submission: &Submission) -> Result<EmailMessage, EmailError> {
    let lines = [
        format!(
            "Name: {} {}",
            submission.first_name, submission.last_name
        ),
        format!("Objective: {}", submission.objectives),
        format!("Email: {}", submission.email),
        format!("Phone: {}", submission.phone_number),
        format!("Response: {}", submission.response),
        format!("Plan: {}", submission.plan),
        format!("Availability: {}", submission.availability),
        format!("Found via: {}", submission.found_via),
        format!("Message: {}", submission.message),
    ];

    let subject = EmailSubject::try_from(LEAD_SUBJECT)?;
    let text_content = EmailTextContent::try_from(lines.join("\n"))?;

    Ok(EmailMessage::new(subject, text_content))
}
