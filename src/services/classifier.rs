use serde_json::{Map, Value as JsonValue};

use crate::models::severity::{AnalyticsSeverity, MonitorSeverity};

pub const FACE_NOT_DETECTED: &str = "FACE_NOT_DETECTED";
pub const MULTIPLE_FACES: &str = "MULTIPLE_FACES";
pub const LOOKING_AWAY: &str = "LOOKING_AWAY";
pub const SUSPICIOUS_OBJECT: &str = "SUSPICIOUS_OBJECT";
pub const VOICE_DETECTED: &str = "VOICE_DETECTED";
pub const TAB_SWITCH: &str = "TAB_SWITCH";
/// Tab-switch tag used by analytics callers.
pub const TAB_SWITCHING: &str = "TAB_SWITCHING";

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub severity: MonitorSeverity,
    pub message: &'static str,
    pub details: String,
}

/// Classifies an event submitted from the student's client.
pub fn classify(event_type: &str, details: &Map<String, JsonValue>) -> Classification {
    let (severity, message) = monitor_severity(event_type);
    Classification {
        severity,
        message,
        details: describe(event_type, details),
    }
}

pub fn monitor_severity(event_type: &str) -> (MonitorSeverity, &'static str) {
    match event_type {
        FACE_NOT_DETECTED => (MonitorSeverity::Warning, "face must remain visible at all times"),
        MULTIPLE_FACES => (MonitorSeverity::Critical, "multiple faces not allowed"),
        LOOKING_AWAY => (MonitorSeverity::Warning, "must focus on screen"),
        SUSPICIOUS_OBJECT => (MonitorSeverity::Warning, "remove suspicious object"),
        VOICE_DETECTED => (MonitorSeverity::Warning, "remain quiet"),
        TAB_SWITCH => (MonitorSeverity::Critical, "switching tabs not allowed"),
        _ => (MonitorSeverity::None, "event recorded"),
    }
}

/// Severity for records arriving through the analytics path.
pub fn analytics_severity(event_type: &str) -> AnalyticsSeverity {
    match event_type {
        TAB_SWITCHING | MULTIPLE_FACES => AnalyticsSeverity::High,
        FACE_NOT_DETECTED | LOOKING_AWAY => AnalyticsSeverity::Medium,
        _ => AnalyticsSeverity::Low,
    }
}

/// Renders the one-line audit description. Missing or non-numeric fields
/// degrade to the generic "<type> detected" line.
pub fn describe(event_type: &str, details: &Map<String, JsonValue>) -> String {
    let rendered = match event_type {
        FACE_NOT_DETECTED => number(details, "duration").zip(number(details, "confidence")).map(
            |(duration, confidence)| {
                format!(
                    "face not detected for {:.1} seconds (confidence {:.2})",
                    duration, confidence
                )
            },
        ),
        MULTIPLE_FACES => number(details, "count")
            .map(|count| format!("multiple faces detected: {}", count.trunc() as i64)),
        LOOKING_AWAY => {
            number(details, "duration").map(|duration| format!("looking away for {:.1} seconds", duration))
        }
        TAB_SWITCH => Some("user switched tabs".to_string()),
        _ => None,
    };

    rendered.unwrap_or_else(|| format!("{} detected", event_type))
}

fn number(details: &Map<String, JsonValue>, key: &str) -> Option<f64> {
    details.get(key).and_then(JsonValue::as_f64)
}
