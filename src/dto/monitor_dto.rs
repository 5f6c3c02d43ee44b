use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use validator::Validate;

use crate::models::severity::MonitorSeverity;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonitorEventRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "eventType is required"))]
    pub event_type: String,
    pub timestamp: Option<String>,
    /// Free-form detection payload; anything other than an object is ignored.
    pub details: Option<JsonValue>,
    pub image_data: Option<String>,
}

impl MonitorEventRequest {
    pub fn details_map(&self) -> Map<String, JsonValue> {
        match &self.details {
            Some(JsonValue::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorEventResponse {
    pub received: bool,
    pub severity: MonitorSeverity,
    pub message: String,
}
