use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::attempt::{Answer, Attempt};

/// Read access to assessment attempts owned by the attempt-management subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Fetches a live attempt in a single read; `answers` is left empty.
    /// Absent or soft-deleted attempts yield `Error::NotFound`.
    async fn find_by_id(&self, id: i64) -> Result<Attempt>;
}

#[derive(Clone)]
pub struct PgAttemptStore {
    pool: PgPool,
}

impl PgAttemptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Answers recorded for an attempt, in submission order.
    pub async fn load_answers(&self, attempt_id: i64) -> Result<Vec<Answer>> {
        let answers = sqlx::query_as::<_, Answer>(
            r#"SELECT id, attempt_id, question_id, answer, created_at
               FROM answers
               WHERE attempt_id = $1
               ORDER BY id"#,
        )
        .bind(attempt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }
}

#[async_trait]
impl AttemptStore for PgAttemptStore {
    async fn find_by_id(&self, id: i64) -> Result<Attempt> {
        let attempt = sqlx::query_as::<_, Attempt>(
            r#"SELECT id, user_id, assessment_id, status
               FROM attempts
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Attempt with ID {} not found", id)))?;
        Ok(attempt)
    }
}
