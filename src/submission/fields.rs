use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::ValidationPolicy;
use crate::models::NewSubmission;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// The five fields of the contact form. Unknown keys are ignored; missing keys
/// and explicit nulls both come through as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactPayload {
    pub fn into_submission(self) -> NewSubmission {
        NewSubmission {
            id: Uuid::now_v7(),
            fullname: self.fullname,
            email: self.email,
            contact: self.contact,
            subject: self.subject,
            message: self.message,
        }
    }

    fn named_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("fullname", self.fullname.as_deref()),
            ("email", self.email.as_deref()),
            ("contact", self.contact.as_deref()),
            ("subject", self.subject.as_deref()),
            ("message", self.message.as_deref()),
        ]
    }
}

/// Check a payload against the policy. Returns every problem found; an empty
/// list means the payload is accepted.
pub fn validate(payload: &ContactPayload, policy: ValidationPolicy) -> Vec<String> {
    let mut problems = Vec::new();

    if policy == ValidationPolicy::Permissive {
        return problems;
    }

    for (name, value) in payload.named_fields() {
        match value {
            None => problems.push(format!("Missing required field: {name}")),
            Some("") => problems.push(format!("Required field is empty: {name}")),
            Some(_) => {}
        }
    }

    if let Some(email) = payload.email.as_deref().filter(|s| !s.is_empty()) {
        if !EMAIL_RE.is_match(email) {
            problems.push("Invalid email format: email".to_string());
        }
    }

    problems
}
