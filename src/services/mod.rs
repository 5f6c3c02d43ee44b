pub mod analytics_service;
pub mod classifier;
pub mod monitor_service;
