use crate::models::Submission;

pub const SUBJECT_PREFIX: &str = "New Contact Form Submission: ";

pub fn render_subject(submission: &Submission) -> String {
    format!("{SUBJECT_PREFIX}{}", field(&submission.subject))
}

/// Plain-text body sent to the operator for a new submission.
pub fn render_submission(submission: &Submission) -> String {
    format!(
        "Name: {}\nEmail: {}\nContact: {}\nMessage: {}",
        field(&submission.fullname),
        field(&submission.email),
        field(&submission.contact),
        field(&submission.message),
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
