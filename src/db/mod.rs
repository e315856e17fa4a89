pub mod submissions;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::models::{NewSubmission, Submission};

/// Durable storage for contact submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Write one submission and return it with its store-assigned timestamp.
    async fn create(&self, new: &NewSubmission) -> Result<Submission, sqlx::Error>;
}

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn create(&self, new: &NewSubmission) -> Result<Submission, sqlx::Error> {
        submissions::create(&self.pool, new).await
    }
}

/// Build a pool that connects on first use, so an unreachable database does
/// not hold up startup. Only a malformed URL fails here.
pub fn connect(database_url: &str, acquire_timeout: Duration) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
}

/// Apply migrations without blocking the caller. Failure is logged; requests
/// will then fail individually at write time.
pub fn spawn_migrations(pool: PgPool) -> JoinHandle<Result<(), MigrateError>> {
    tokio::spawn(async move {
        let result = sqlx::migrate!("./migrations").run(&pool).await;
        match &result {
            Ok(()) => tracing::info!("Database connected, migrations applied"),
            Err(e) => tracing::error!("Database unavailable at startup: {e}"),
        }
        result
    })
}
