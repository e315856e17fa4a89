use sqlx::PgPool;

use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, new: &NewSubmission) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO messages (id, fullname, email, contact, subject, message)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(new.id)
    .bind(&new.fullname)
    .bind(&new.email)
    .bind(&new.contact)
    .bind(&new.subject)
    .bind(&new.message)
    .fetch_one(pool)
    .await
}
