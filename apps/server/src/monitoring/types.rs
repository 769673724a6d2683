use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a monitor: its creation time in milliseconds, bumped when
/// two monitors are created within the same millisecond.
pub type MonitorId = u64;

/// A configured recurring probe of one target URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: MonitorId,

    /// Target URL, stored as given and never re-validated
    pub url: String,

    /// Lower bound of the re-arm delay, in seconds
    pub min_interval: u64,

    /// Upper bound of the re-arm delay, in seconds
    pub max_interval: u64,

    pub created_at: DateTime<Utc>,
}

/// Body of a monitor creation request.
///
/// Every field is optional here so that a missing one is reported as an
/// invalid argument instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonitor {
    pub url: Option<String>,
    pub min_interval: Option<u64>,
    pub max_interval: Option<u64>,
}

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRecord {
    pub timestamp: DateTime<Utc>,

    /// HTTP status code, `0` for a transport-level failure
    pub status_code: u16,

    /// Leading part of the response body, or `Error: <description>`
    pub response: String,
}

impl ProbeRecord {
    /// Record a response, keeping at most `snippet_length` characters of the body
    pub fn response(status_code: u16, body: &str, snippet_length: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            status_code,
            response: body.chars().take(snippet_length).collect(),
        }
    }

    /// Record a probe that never got a response
    pub fn failure(error: impl std::fmt::Display) -> Self {
        Self { timestamp: Utc::now(), status_code: 0, response: format!("Error: {error}") }
    }

    pub fn is_failure(&self) -> bool {
        self.status_code == 0
    }
}

/// A monitor together with its current history, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    #[serde(flatten)]
    pub monitor: Monitor,
    pub records: Vec<ProbeRecord>,
}
