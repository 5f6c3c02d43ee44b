use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuspiciousActivityRequest {
    #[serde(rename = "attemptID", default)]
    pub attempt_id: String,
    #[serde(rename = "assessmentId", default)]
    #[validate(length(min = 1, message = "assessmentId is required"))]
    pub assessment_id: String,
    #[serde(rename = "type", default)]
    #[validate(length(min = 1, message = "type is required"))]
    pub activity_type: String,
    #[serde(default)]
    pub details: Option<String>,
    pub timestamp: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    #[serde(rename = "imageData")]
    pub image_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousActivityListResponse {
    #[serde(rename = "attemptID")]
    pub attempt_id: i64,
    pub total: usize,
    pub activities: Vec<crate::models::suspicious_activity::SuspiciousActivity>,
}
