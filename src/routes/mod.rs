pub mod analytics;
pub mod health;
pub mod student;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};

use crate::middleware::auth::{require_bearer_auth, require_reviewer};
use crate::AppState;

/// Application routes without the outer HTTP layers (CORS, tracing, body limit).
pub fn router(state: AppState) -> Router {
    let bearer = from_fn_with_state(state.jwt.clone(), require_bearer_auth);

    let student_api = Router::new()
        .route(
            "/student/attempts/:attemptId/monitor",
            post(student::submit_monitor_event),
        )
        .route_layer(bearer.clone());

    let review_api = Router::new()
        .route(
            "/analytics/attempts/:attemptId/suspicious",
            get(analytics::list_suspicious_activity),
        )
        .route_layer(from_fn(require_reviewer))
        .route_layer(bearer.clone());

    let analytics_api = Router::new()
        .route(
            "/analytics/suspicious",
            post(analytics::log_suspicious_activity),
        )
        .route_layer(bearer);

    Router::new()
        .route("/health", get(health::health))
        .merge(student_api)
        .merge(analytics_api)
        .merge(review_api)
        .with_state(state)
}
