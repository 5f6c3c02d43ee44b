use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::severity::Severity;

/// A classified record ready to be appended to the activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuspiciousActivity {
    pub user_id: i64,
    pub assessment_id: i64,
    pub attempt_id: i64,
    pub activity_type: String,
    pub severity: Severity,
    pub details: String,
    pub image_data: Option<Vec<u8>>,
    pub user_agent: Option<String>,
    /// Unset means "now", filled in before persisting.
    pub occurred_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousActivity {
    pub id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub assessment_id: i64,
    #[serde(rename = "attemptID")]
    pub attempt_id: i64,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub severity: Severity,
    pub details: String,
    #[serde(
        rename = "imageData",
        default,
        with = "crate::utils::image::base64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_data: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(rename = "timestamp")]
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for SuspiciousActivity {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let severity: String = row.try_get("severity")?;
        let severity = severity
            .parse::<Severity>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "severity".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            assessment_id: row.try_get("assessment_id")?,
            attempt_id: row.try_get("attempt_id")?,
            activity_type: row.try_get("activity_type")?,
            severity,
            details: row.try_get("details")?,
            image_data: row.try_get("image_data")?,
            user_agent: row.try_get("user_agent")?,
            occurred_at: row.try_get("occurred_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::severity::AnalyticsSeverity;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_boundary_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let record = SuspiciousActivity {
            id: 11,
            user_id: 7,
            assessment_id: 5,
            attempt_id: 1,
            activity_type: "TAB_SWITCHING".to_string(),
            severity: AnalyticsSeverity::High.into(),
            details: "left the page".to_string(),
            image_data: Some(vec![0xff, 0xd8]),
            user_agent: None,
            occurred_at: at,
            created_at: at,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "TAB_SWITCHING");
        assert_eq!(json["severity"], "HIGH");
        assert_eq!(json["userID"], 7);
        assert_eq!(json["attemptID"], 1);
        assert_eq!(json["assessmentId"], 5);
        assert_eq!(json["imageData"], "/9g=");
        assert!(json.get("userAgent").is_none());
        assert!(json["timestamp"].as_str().unwrap().starts_with("2024-05-01T10:00:00"));
    }
}
