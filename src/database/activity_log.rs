use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::suspicious_activity::{NewSuspiciousActivity, SuspiciousActivity};

/// Append-only log of classified suspicious activity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Persists one record in a single write. The store assigns `id` and
    /// `created_at`; an unset occurrence time is stored as the write time.
    async fn save(&self, record: NewSuspiciousActivity) -> Result<SuspiciousActivity>;

    /// All records for an attempt, oldest occurrence first.
    async fn list_for_attempt(&self, attempt_id: i64) -> Result<Vec<SuspiciousActivity>>;
}

#[derive(Clone)]
pub struct PgActivityLog {
    pool: PgPool,
}

impl PgActivityLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLog for PgActivityLog {
    async fn save(&self, record: NewSuspiciousActivity) -> Result<SuspiciousActivity> {
        let row = sqlx::query_as::<_, SuspiciousActivity>(
            r#"
            INSERT INTO suspicious_activities (
                user_id, assessment_id, attempt_id, activity_type, severity,
                details, image_data, user_agent, occurred_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, NOW()), NOW())
            RETURNING id, user_id, assessment_id, attempt_id, activity_type, severity,
                      details, image_data, user_agent, occurred_at, created_at
            "#,
        )
        .bind(record.user_id)
        .bind(record.assessment_id)
        .bind(record.attempt_id)
        .bind(&record.activity_type)
        .bind(record.severity.as_str())
        .bind(&record.details)
        .bind(record.image_data.as_deref())
        .bind(record.user_agent.as_deref())
        .bind(record.occurred_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_for_attempt(&self, attempt_id: i64) -> Result<Vec<SuspiciousActivity>> {
        let rows = sqlx::query_as::<_, SuspiciousActivity>(
            r#"
            SELECT id, user_id, assessment_id, attempt_id, activity_type, severity,
                   details, image_data, user_agent, occurred_at, created_at
            FROM suspicious_activities
            WHERE attempt_id = $1
            ORDER BY occurred_at ASC, id ASC
            "#,
        )
        .bind(attempt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
