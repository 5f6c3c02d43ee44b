use std::sync::Arc;

use crate::database::ActivityLog;
use crate::error::Result;
use crate::models::suspicious_activity::{NewSuspiciousActivity, SuspiciousActivity};
use crate::utils::time::now;

/// Records activity reported by trusted analytics/system callers and serves
/// the review listing. Identifiers are expected to be validated upstream.
#[derive(Clone)]
pub struct AnalyticsService {
    activity_log: Arc<dyn ActivityLog>,
}

impl AnalyticsService {
    pub fn new(activity_log: Arc<dyn ActivityLog>) -> Self {
        Self { activity_log }
    }

    pub async fn log_activity(&self, mut record: NewSuspiciousActivity) -> Result<SuspiciousActivity> {
        if record.occurred_at.is_none() {
            record.occurred_at = Some(now());
        }

        let saved = self.activity_log.save(record).await?;
        tracing::info!(
            "Logged {} ({}) for attempt {} by user {}",
            saved.activity_type,
            saved.severity,
            saved.attempt_id,
            saved.user_id
        );
        Ok(saved)
    }

    pub async fn list_activities(&self, attempt_id: i64) -> Result<Vec<SuspiciousActivity>> {
        self.activity_log.list_for_attempt(attempt_id).await
    }
}
