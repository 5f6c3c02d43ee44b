use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

use crate::database::{ActivityLog, AttemptStore};
use crate::dto::monitor_dto::MonitorEventResponse;
use crate::error::{Error, Result};
use crate::models::suspicious_activity::NewSuspiciousActivity;
use crate::services::classifier;
use crate::utils::time::now;

/// One event as reported by the student's monitoring client.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorEvent {
    pub attempt_id: i64,
    pub event_type: String,
    pub details: Map<String, JsonValue>,
    pub image_data: Option<Vec<u8>>,
    pub user_agent: Option<String>,
}

/// Authorizes, classifies and records events from an attempt's owner.
#[derive(Clone)]
pub struct MonitorService {
    attempts: Arc<dyn AttemptStore>,
    activity_log: Arc<dyn ActivityLog>,
}

impl MonitorService {
    pub fn new(attempts: Arc<dyn AttemptStore>, activity_log: Arc<dyn ActivityLog>) -> Self {
        Self {
            attempts,
            activity_log,
        }
    }

    pub async fn submit_event(&self, event: MonitorEvent, caller_id: i64) -> Result<MonitorEventResponse> {
        let attempt = self.attempts.find_by_id(event.attempt_id).await?;

        if attempt.user_id != caller_id {
            tracing::warn!(
                "User {} submitted an event for attempt {} owned by user {}",
                caller_id,
                attempt.id,
                attempt.user_id
            );
            return Err(Error::Unauthorized(
                "Unauthorized access to attempt".to_string(),
            ));
        }

        if !attempt.status.is_open() {
            tracing::info!(
                "Rejected {} for attempt {} in status {}",
                event.event_type,
                attempt.id,
                attempt.status
            );
            return Err(Error::InvalidState(
                "Attempt is not in progress".to_string(),
            ));
        }

        let classification = classifier::classify(&event.event_type, &event.details);

        let record = NewSuspiciousActivity {
            user_id: caller_id,
            assessment_id: attempt.assessment_id,
            attempt_id: attempt.id,
            activity_type: event.event_type,
            severity: classification.severity.into(),
            details: classification.details,
            image_data: event.image_data,
            user_agent: event.user_agent,
            occurred_at: Some(now()),
        };

        let saved = self.activity_log.save(record).await?;
        tracing::info!(
            "Recorded {} ({}) for attempt {} as activity {}",
            saved.activity_type,
            classification.severity.as_str(),
            saved.attempt_id,
            saved.id
        );

        Ok(MonitorEventResponse {
            received: true,
            severity: classification.severity,
            message: classification.message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::activity_log::MockActivityLog;
    use crate::database::attempt_store::MockAttemptStore;
    use crate::models::attempt::{Attempt, AttemptStatus};
    use crate::models::severity::{MonitorSeverity, Severity};
    use crate::models::suspicious_activity::SuspiciousActivity;
    use mockall::predicate::eq;
    use serde_json::json;

    fn attempt(status: &str) -> Attempt {
        Attempt {
            id: 42,
            user_id: 7,
            assessment_id: 5,
            status: AttemptStatus::from(status),
            answers: Vec::new(),
        }
    }

    fn event(event_type: &str, details: JsonValue) -> MonitorEvent {
        MonitorEvent {
            attempt_id: 42,
            event_type: event_type.to_string(),
            details: details.as_object().cloned().unwrap_or_default(),
            image_data: None,
            user_agent: None,
        }
    }

    fn echo(record: NewSuspiciousActivity) -> Result<SuspiciousActivity> {
        let created_at = now();
        Ok(SuspiciousActivity {
            id: 1,
            user_id: record.user_id,
            assessment_id: record.assessment_id,
            attempt_id: record.attempt_id,
            activity_type: record.activity_type,
            severity: record.severity,
            details: record.details,
            image_data: record.image_data,
            user_agent: record.user_agent,
            occurred_at: record.occurred_at.unwrap_or(created_at),
            created_at,
        })
    }

    fn attempts_returning(status: &'static str) -> MockAttemptStore {
        let mut attempts = MockAttemptStore::new();
        attempts
            .expect_find_by_id()
            .with(eq(42))
            .times(1)
            .returning(move |_| Ok(attempt(status)));
        attempts
    }

    fn service(attempts: MockAttemptStore, log: MockActivityLog) -> MonitorService {
        MonitorService::new(Arc::new(attempts), Arc::new(log))
    }

    #[tokio::test]
    async fn owner_event_is_classified_and_recorded_once() {
        let mut log = MockActivityLog::new();
        log.expect_save()
            .withf(|r| {
                r.user_id == 7
                    && r.assessment_id == 5
                    && r.attempt_id == 42
                    && r.activity_type == "MULTIPLE_FACES"
                    && r.severity == Severity::Monitor(MonitorSeverity::Critical)
                    && r.details == "multiple faces detected: 3"
                    && r.occurred_at.is_some()
            })
            .times(1)
            .returning(echo);

        let svc = service(attempts_returning("InProgress"), log);
        let resp = svc
            .submit_event(event("MULTIPLE_FACES", json!({"count": 3.0})), 7)
            .await
            .unwrap();

        assert!(resp.received);
        assert_eq!(resp.severity, MonitorSeverity::Critical);
        assert_eq!(resp.message, "multiple faces not allowed");
    }

    #[tokio::test]
    async fn occurrence_time_is_stamped_at_submission() {
        let before = now();
        let mut log = MockActivityLog::new();
        log.expect_save()
            .withf(move |r| r.occurred_at.map_or(false, |at| at >= before && at <= now()))
            .times(1)
            .returning(echo);

        let svc = service(attempts_returning("InProgress"), log);
        tokio_test::assert_ok!(svc.submit_event(event("TAB_SWITCH", json!({})), 7).await);
    }

    #[tokio::test]
    async fn image_evidence_is_stored_untouched() {
        let mut log = MockActivityLog::new();
        log.expect_save()
            .withf(|r| r.image_data.as_deref() == Some(&[1u8, 2, 3][..]))
            .times(1)
            .returning(echo);

        let svc = service(attempts_returning("InProgress"), log);
        let mut ev = event("FACE_NOT_DETECTED", json!({"duration": 2.0, "confidence": 0.4}));
        ev.image_data = Some(vec![1, 2, 3]);
        let resp = svc.submit_event(ev, 7).await.unwrap();
        assert_eq!(resp.severity, MonitorSeverity::Warning);
    }

    #[tokio::test]
    async fn non_owner_is_rejected_without_writing() {
        for event_type in ["MULTIPLE_FACES", "TAB_SWITCH", "SOMETHING_ELSE"] {
            let mut log = MockActivityLog::new();
            log.expect_save().never();
            let svc = service(attempts_returning("InProgress"), log);

            let err = svc.submit_event(event(event_type, json!({})), 9).await.unwrap_err();
            assert!(matches!(err, Error::Unauthorized(_)), "{}", event_type);
        }
    }

    #[tokio::test]
    async fn closed_attempt_is_rejected_without_writing() {
        for status in ["Completed", "Abandoned", "in_progress"] {
            let mut log = MockActivityLog::new();
            log.expect_save().never();
            let svc = service(attempts_returning(status), log);

            let err = svc.submit_event(event("LOOKING_AWAY", json!({})), 7).await.unwrap_err();
            assert!(matches!(err, Error::InvalidState(_)), "{}", status);
        }
    }

    #[tokio::test]
    async fn ownership_is_checked_before_state() {
        let mut log = MockActivityLog::new();
        log.expect_save().never();
        let svc = service(attempts_returning("Completed"), log);

        let err = svc.submit_event(event("TAB_SWITCH", json!({})), 9).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[tokio::test]
    async fn missing_attempt_is_not_found() {
        let mut attempts = MockAttemptStore::new();
        attempts
            .expect_find_by_id()
            .returning(|id| Err(Error::NotFound(format!("Attempt with ID {} not found", id))));
        let mut log = MockActivityLog::new();
        log.expect_save().never();

        let err = service(attempts, log)
            .submit_event(event("TAB_SWITCH", json!({})), 7)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_persistence_error() {
        let mut log = MockActivityLog::new();
        log.expect_save()
            .times(1)
            .returning(|_| Err(Error::Persistence(sqlx::Error::PoolTimedOut)));

        let svc = service(attempts_returning("InProgress"), log);
        let err = tokio_test::assert_err!(svc.submit_event(event("VOICE_DETECTED", json!({})), 7).await);
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[tokio::test]
    async fn unexpected_details_still_record_generic_line() {
        let mut log = MockActivityLog::new();
        log.expect_save()
            .withf(|r| r.details == "FACE_NOT_DETECTED detected")
            .times(1)
            .returning(echo);

        let svc = service(attempts_returning("In Progress"), log);
        let resp = svc
            .submit_event(event("FACE_NOT_DETECTED", json!({"duration": "a while"})), 7)
            .await
            .unwrap();
        assert_eq!(resp.message, "face must remain visible at all times");
    }
}
