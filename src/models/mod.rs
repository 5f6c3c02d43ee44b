pub mod attempt;
pub mod severity;
pub mod suspicious_activity;
