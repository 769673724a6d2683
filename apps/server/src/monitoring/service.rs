use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::fetcher::{Fetcher, HttpFetcher};
use super::history::HistoryRing;
use super::registry::{MonitorError, MonitorRegistry};
use super::scheduler::Scheduler;
use super::types::{Monitor, MonitorId, MonitorSnapshot, NewMonitor};
use super::HISTORY_CAPACITY;
use crate::config::MonitorSettings;

/// Owns the registry, the histories and the schedules of all URL monitors.
///
/// Every mutation goes through this type so the three stay consistent: a
/// monitor is scheduled and has a history exactly while it is registered.
pub struct MonitorService {
    registry: MonitorRegistry,
    history: Arc<HistoryRing>,
    scheduler: Scheduler,
}

impl MonitorService {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        let history = Arc::new(HistoryRing::new(HISTORY_CAPACITY));

        Self {
            registry: MonitorRegistry::new(),
            scheduler: Scheduler::new(fetcher, history.clone()),
            history,
        }
    }

    /// Build a service probing over HTTP with the configured timeout
    pub fn from_settings(settings: &MonitorSettings) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(
            Duration::from_secs(settings.timeout_seconds),
            settings.snippet_length,
        )?;

        Ok(Self::new(Arc::new(fetcher)))
    }

    /// Register a monitor and start probing it
    pub fn create(&self, request: NewMonitor) -> Result<Monitor, MonitorError> {
        let monitor = self.registry.create(request)?;

        self.history.create(monitor.id);
        self.scheduler.start(&monitor);

        info!(
            monitor_id = monitor.id,
            url = %monitor.url,
            min_interval = monitor.min_interval,
            max_interval = monitor.max_interval,
            "URL monitor created"
        );

        Ok(monitor)
    }

    pub fn list(&self) -> Vec<MonitorSnapshot> {
        self.registry.list().into_iter().map(|monitor| self.snapshot(monitor)).collect()
    }

    pub fn get(&self, id: MonitorId) -> Option<MonitorSnapshot> {
        self.registry.get(id).map(|monitor| self.snapshot(monitor))
    }

    /// Stop a monitor and forget it along with its history
    pub fn delete(&self, id: MonitorId) -> Result<(), MonitorError> {
        let monitor = self.registry.remove(id)?;

        // Cancel before clearing so a late probe cannot refill the history.
        self.scheduler.stop(id);
        self.history.clear(id);

        info!(monitor_id = id, url = %monitor.url, "URL monitor deleted");
        Ok(())
    }

    pub fn is_active(&self, id: MonitorId) -> bool {
        self.scheduler.is_active(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Stop all schedules, leaving registry and histories readable
    pub fn shutdown(&self) {
        let active = self.scheduler.active_count();
        self.scheduler.shutdown();
        info!("Stopped {active} URL monitor(s)");
    }

    fn snapshot(&self, monitor: Monitor) -> MonitorSnapshot {
        let records = self.history.get(monitor.id);
        MonitorSnapshot { monitor, records }
    }
}
