pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::database::{ActivityLog, AttemptStore, PgActivityLog, PgAttemptStore};
use crate::middleware::auth::JwtVerifier;
use crate::services::{analytics_service::AnalyticsService, monitor_service::MonitorService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub monitor_service: MonitorService,
    pub analytics_service: AnalyticsService,
    pub jwt: JwtVerifier,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let attempts: Arc<dyn AttemptStore> = Arc::new(PgAttemptStore::new(pool.clone()));
        let activity_log: Arc<dyn ActivityLog> = Arc::new(PgActivityLog::new(pool));
        Self::from_stores(attempts, activity_log, &config.jwt_secret)
    }

    pub fn from_stores(
        attempts: Arc<dyn AttemptStore>,
        activity_log: Arc<dyn ActivityLog>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            monitor_service: MonitorService::new(attempts, activity_log.clone()),
            analytics_service: AnalyticsService::new(activity_log),
            jwt: JwtVerifier::new(jwt_secret),
        }
    }
}
