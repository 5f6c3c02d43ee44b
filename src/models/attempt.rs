use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::{postgres::PgRow, FromRow, Row};
use std::fmt;

/// Lifecycle status of an attempt. Only `InProgress` carries meaning here;
/// every other state is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    InProgress,
    Completed,
    Other(String),
}

impl AttemptStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttemptStatus::InProgress => "InProgress",
            AttemptStatus::Completed => "Completed",
            AttemptStatus::Other(raw) => raw,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, AttemptStatus::InProgress)
    }
}

impl From<String> for AttemptStatus {
    fn from(raw: String) -> Self {
        // the attempt subsystem has written both spellings
        match raw.as_str() {
            "InProgress" | "In Progress" => AttemptStatus::InProgress,
            "Completed" => AttemptStatus::Completed,
            _ => AttemptStatus::Other(raw),
        }
    }
}

impl From<&str> for AttemptStatus {
    fn from(raw: &str) -> Self {
        AttemptStatus::from(raw.to_string())
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AttemptStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttemptStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(AttemptStatus::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub answer: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub user_id: i64,
    pub assessment_id: i64,
    pub status: AttemptStatus,
    /// Populated on demand by `PgAttemptStore::load_answers`.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl<'r> FromRow<'r, PgRow> for Attempt {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            assessment_id: row.try_get("assessment_id")?,
            status: AttemptStatus::from(status),
            answers: Vec::new(),
        })
    }
}
