use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;

use super::types::{Monitor, MonitorId, NewMonitor};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Monitor {0} not found")]
    NotFound(MonitorId),
}

#[derive(Default)]
struct RegistryInner {
    monitors: BTreeMap<MonitorId, Monitor>,
    last_id: MonitorId,
}

/// Owns every configured monitor, keyed by id in creation order
#[derive(Default)]
pub struct MonitorRegistry {
    inner: RwLock<RegistryInner>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the request and store a new monitor under a fresh id
    pub fn create(&self, request: NewMonitor) -> Result<Monitor, MonitorError> {
        let (url, min_interval, max_interval) = validate(request)?;

        let created_at = Utc::now();
        let mut inner = self.inner.write();

        let stamp = MonitorId::try_from(created_at.timestamp_millis()).unwrap_or_default();
        let id = stamp.max(inner.last_id + 1);
        inner.last_id = id;

        let monitor = Monitor { id, url, min_interval, max_interval, created_at };
        inner.monitors.insert(id, monitor.clone());

        Ok(monitor)
    }

    pub fn list(&self) -> Vec<Monitor> {
        self.inner.read().monitors.values().cloned().collect()
    }

    pub fn get(&self, id: MonitorId) -> Option<Monitor> {
        self.inner.read().monitors.get(&id).cloned()
    }

    pub fn remove(&self, id: MonitorId) -> Result<Monitor, MonitorError> {
        self.inner.write().monitors.remove(&id).ok_or(MonitorError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.inner.read().monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(request: NewMonitor) -> Result<(String, u64, u64), MonitorError> {
    let url = request.url.filter(|url| !url.trim().is_empty());
    let min_interval = request.min_interval.filter(|&secs| secs > 0);
    let max_interval = request.max_interval.filter(|&secs| secs > 0);

    let (Some(url), Some(min_interval), Some(max_interval)) = (url, min_interval, max_interval)
    else {
        return Err(MonitorError::InvalidArgument(
            "url, minInterval and maxInterval are required".to_string(),
        ));
    };

    if min_interval > max_interval {
        return Err(MonitorError::InvalidArgument(format!(
            "minInterval ({min_interval}) must not exceed maxInterval ({max_interval})"
        )));
    }

    Ok((url, min_interval, max_interval))
}
