use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::dto::analytics_dto::{SuspiciousActivityListResponse, SuspiciousActivityRequest};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::suspicious_activity::NewSuspiciousActivity;
use crate::routes::student::user_agent;
use crate::services::classifier::analytics_severity;
use crate::utils::{ids::parse_id, image::decode_image_data, time};
use crate::AppState;

#[axum::debug_handler]
pub async fn log_suspicious_activity(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
    payload: std::result::Result<Json<SuspiciousActivityRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload?;
    req.validate()?;

    let assessment_id = parse_id(&req.assessment_id, "assessment ID")?;
    let user_id = claims.caller_id()?;
    let attempt_id = parse_id(&req.attempt_id, "attempt ID")?;

    let occurred_at = match req.timestamp.as_deref().filter(|ts| !ts.is_empty()) {
        Some(ts) => Some(
            time::from_rfc3339(ts)
                .map_err(|_| Error::BadRequest("Invalid timestamp format".to_string()))?,
        ),
        None => None,
    };

    let image_data = match req.image_data.as_deref() {
        Some(raw) => decode_image_data(raw)?,
        None => None,
    };

    let record = NewSuspiciousActivity {
        user_id,
        assessment_id,
        attempt_id,
        severity: analytics_severity(&req.activity_type).into(),
        activity_type: req.activity_type,
        details: req.details.unwrap_or_default(),
        image_data,
        user_agent: req
            .user_agent
            .filter(|ua| !ua.is_empty())
            .or_else(|| user_agent(&headers)),
        occurred_at,
    };

    let saved = state.analytics_service.log_activity(record).await.map_err(|e| {
        tracing::error!("Failed to log suspicious activity for attempt {}: {}", attempt_id, e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(saved)))
}

#[axum::debug_handler]
pub async fn list_suspicious_activity(
    State(state): State<AppState>,
    Path(attempt_id): Path<String>,
) -> Result<impl IntoResponse> {
    let attempt_id = parse_id(&attempt_id, "attempt ID")?;
    let activities = state.analytics_service.list_activities(attempt_id).await?;
    Ok(Json(SuspiciousActivityListResponse {
        attempt_id,
        total: activities.len(),
        activities,
    }))
}
