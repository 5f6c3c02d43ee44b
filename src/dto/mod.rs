pub mod analytics_dto;
pub mod monitor_dto;
