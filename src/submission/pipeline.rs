use crate::email::Notification;
use crate::error::SubmitError;
use crate::models::Submission;
use crate::state::AppState;

use super::fields::{self, ContactPayload};

/// Validate, persist, then notify. The notification is only attempted once the
/// store has acknowledged the write, and a failed send leaves the record in place.
pub async fn run(state: &AppState, payload: ContactPayload) -> Result<Submission, SubmitError> {
    let problems = fields::validate(&payload, state.config.validation);
    if !problems.is_empty() {
        return Err(SubmitError::InvalidPayload(problems.join("; ")));
    }

    let new = payload.into_submission();
    let submission = state.store.create(&new).await?;

    tracing::debug!("Stored submission {}", submission.id);

    let smtp = &state.config.smtp;
    let notification = Notification::for_submission(&submission, &smtp.to, &smtp.user);
    state
        .notifier
        .send(&notification)
        .await
        .map_err(SubmitError::Notify)?;

    tracing::info!("Relayed submission {} to {}", submission.id, notification.to);

    Ok(submission)
}
