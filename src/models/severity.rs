use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Real-time risk tier returned to the student client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorSeverity {
    None,
    Warning,
    Critical,
}

impl MonitorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorSeverity::None => "NONE",
            MonitorSeverity::Warning => "WARNING",
            MonitorSeverity::Critical => "CRITICAL",
        }
    }
}

/// Triage tier attached to records submitted by analytics/system callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsSeverity {
    Low,
    Medium,
    High,
}

impl AnalyticsSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsSeverity::Low => "LOW",
            AnalyticsSeverity::Medium => "MEDIUM",
            AnalyticsSeverity::High => "HIGH",
        }
    }
}

/// Severity tag as persisted on a suspicious activity record.
///
/// The two vocabularies stay distinct; a record carries whichever one its
/// submission path produced and is stored as the bare tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Severity {
    Monitor(MonitorSeverity),
    Analytics(AnalyticsSeverity),
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Monitor(s) => s.as_str(),
            Severity::Analytics(s) => s.as_str(),
        }
    }
}

impl From<MonitorSeverity> for Severity {
    fn from(value: MonitorSeverity) -> Self {
        Severity::Monitor(value)
    }
}

impl From<AnalyticsSeverity> for Severity {
    fn from(value: AnalyticsSeverity) -> Self {
        Severity::Analytics(value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown severity tag: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(MonitorSeverity::None.into()),
            "WARNING" => Ok(MonitorSeverity::Warning.into()),
            "CRITICAL" => Ok(MonitorSeverity::Critical.into()),
            "LOW" => Ok(AnalyticsSeverity::Low.into()),
            "MEDIUM" => Ok(AnalyticsSeverity::Medium.into()),
            "HIGH" => Ok(AnalyticsSeverity::High.into()),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}
