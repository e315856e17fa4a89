use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use contact_relay::config::{Config, SmtpConfig, TlsMode, ValidationPolicy};
use contact_relay::db::SubmissionStore;
use contact_relay::email::{build_message, Notification, Notifier};
use contact_relay::models::{NewSubmission, Submission};

pub const OPERATOR: &str = "operator@example.com";
pub const RELAY_USER: &str = "relay@example.com";

/// In-memory stand-in for the Postgres store.
#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<Submission>>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<Submission> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn create(&self, new: &NewSubmission) -> Result<Submission, sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let submission = new.clone().stored_at(Utc::now());
        self.records.lock().unwrap().push(submission.clone());
        Ok(submission)
    }
}

/// Mailer that builds the real message but records it instead of talking SMTP.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Notification>>,
    pub envelope_senders: Mutex<Vec<String>>,
    pub attempts: Mutex<usize>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn envelope_senders(&self) -> Vec<String> {
        self.envelope_senders.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for RecordingMailer {
    async fn send(&self, notification: &Notification) -> Result<(), String> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err("relay refused connection".to_string());
        }
        let message = build_message(notification)?;
        let sender = message
            .envelope()
            .from()
            .map(|a| a.to_string())
            .unwrap_or_default();
        self.envelope_senders.lock().unwrap().push(sender);
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A running test server backed by in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post a contact form as JSON, return (body, status).
    pub async fn send_message(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/send-message"))
            .json(data)
            .send()
            .await
            .expect("send-message request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post a raw body with an explicit content type, return (body, status).
    pub async fn send_raw(&self, content_type: &str, body: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/send-message"))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("raw request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn ann_lee() -> Value {
    json!({
        "fullname": "Ann Lee",
        "email": "ann@x.com",
        "contact": "555-1234",
        "subject": "Pricing",
        "message": "How much for bulk?"
    })
}

pub fn test_config(validation: ValidationPolicy) -> Config {
    Config {
        database_url: "postgres://unused/unused".to_string(),
        db_acquire_timeout: std::time::Duration::from_secs(1),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 4096,
        validation,
        log_level: "warn".to_string(),
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            tls: TlsMode::Plain,
            user: RELAY_USER.to_string(),
            pass: "relay-pass".to_string(),
            to: OPERATOR.to_string(),
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_with(
        MemoryStore::default(),
        RecordingMailer::default(),
        ValidationPolicy::Permissive,
    )
    .await
}

/// Spawn the real router on a random port with the given collaborators.
pub async fn spawn_with(
    store: MemoryStore,
    mailer: RecordingMailer,
    validation: ValidationPolicy,
) -> TestApp {
    let store = Arc::new(store);
    let mailer = Arc::new(mailer);

    let app = contact_relay::build_app(test_config(validation), store.clone(), mailer.clone());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        mailer,
    }
}
