use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored contact-form submission. `created_at` is assigned by the store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A submission that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub id: Uuid,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl NewSubmission {
    /// Attach the store-assigned timestamp.
    pub fn stored_at(self, created_at: DateTime<Utc>) -> Submission {
        Submission {
            id: self.id,
            fullname: self.fullname,
            email: self.email,
            contact: self.contact,
            subject: self.subject,
            message: self.message,
            created_at,
        }
    }
}
