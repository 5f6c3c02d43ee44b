use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::dto::monitor_dto::MonitorEventRequest;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::services::monitor_service::MonitorEvent;
use crate::utils::{ids::parse_id, image::decode_image_data, time};
use crate::AppState;

pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[axum::debug_handler]
pub async fn submit_monitor_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(attempt_id): Path<String>,
    headers: HeaderMap,
    payload: std::result::Result<Json<MonitorEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let caller_id = claims.caller_id().map_err(|e| {
        tracing::error!("[SubmitMonitorEvent] unusable caller identity: {}", e);
        e
    })?;
    let attempt_id = parse_id(&attempt_id, "attempt ID")?;

    let Json(req) = payload?;
    req.validate()?;

    if let Some(ts) = req.timestamp.as_deref().filter(|ts| !ts.trim().is_empty()) {
        let client_ts = time::from_rfc3339(ts)
            .map_err(|_| Error::BadRequest("Invalid timestamp format".to_string()))?;
        tracing::debug!(
            "[SubmitMonitorEvent] client clock skew for attempt {}: {}ms",
            attempt_id,
            (time::now() - client_ts).num_milliseconds()
        );
    }

    let image_data = match req.image_data.as_deref() {
        Some(raw) => decode_image_data(raw).map_err(|e| {
            tracing::error!("[SubmitMonitorEvent] failed to decode image data for attempt {}", attempt_id);
            e
        })?,
        None => None,
    };

    let event = MonitorEvent {
        attempt_id,
        details: req.details_map(),
        event_type: req.event_type,
        image_data,
        user_agent: user_agent(&headers),
    };

    match state.monitor_service.submit_event(event, caller_id).await {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            tracing::error!("[SubmitMonitorEvent] failed to submit monitor event: {}", e);
            Err(e)
        }
    }
}
