use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Browser clients post monitoring events from the assessment page's origin.
pub fn monitoring_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}
