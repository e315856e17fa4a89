pub mod templates;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpConfig, TlsMode};
use crate::models::Submission;

/// A composed plain-text email, independent of the transport that delivers it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Whatever the submitter typed into the email field.
    pub from: String,
    /// Relay account used as `From` when `from` is not a usable mailbox.
    pub sender: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Build the operator alert for a stored submission.
    pub fn for_submission(submission: &Submission, operator: &str, sender: &str) -> Self {
        Self {
            from: submission.email.clone().unwrap_or_default(),
            sender: sender.to_string(),
            to: operator.to_string(),
            subject: templates::render_subject(submission),
            body: templates::render_submission(submission),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = match config.tls {
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| format!("SMTP relay error: {e}"))?
                .port(config.port)
                .credentials(creds)
                .build(),
            TlsMode::Plain => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .credentials(creds)
                .build(),
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| format!("SMTP starttls error: {e}"))?
                .port(config.port)
                .credentials(creds)
                .build(),
        };

        Ok(Self { transport })
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), String> {
        let message = build_message(notification)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

/// Turn a notification into a plain-text message. A submitter address that
/// parses becomes `From` and `Reply-To`; anything else falls back to the relay
/// account, and the raw text only survives in the body.
pub fn build_message(notification: &Notification) -> Result<Message, String> {
    let builder = match notification.from.parse::<Mailbox>() {
        Ok(submitter) => Message::builder().from(submitter.clone()).reply_to(submitter),
        Err(e) => {
            tracing::debug!("Submitter address {:?} unusable ({e}), sending as relay account", notification.from);
            Message::builder().from(
                notification
                    .sender
                    .parse()
                    .map_err(|e| format!("Invalid sender address: {e}"))?,
            )
        }
    };

    builder
        .to(notification
            .to
            .parse()
            .map_err(|e| format!("Invalid to address: {e}"))?)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())
        .map_err(|e| format!("Failed to build email: {e}"))
}
