use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::fetcher::Fetcher;
use super::history::HistoryRing;
use super::types::{Monitor, MonitorId, ProbeRecord};

/// Live schedule of one monitor. Dropping the token out of the map is what
/// stops the re-arm chain.
struct ScheduleHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Where a monitor's task currently is. `Stopped` ends the task.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScheduleState {
    Firing,
    Armed(Duration),
    Stopped,
}

/// Runs one re-arming probe task per active monitor
pub struct Scheduler {
    fetcher: Arc<dyn Fetcher>,
    history: Arc<HistoryRing>,
    handles: Mutex<HashMap<MonitorId, ScheduleHandle>>,
}

impl Scheduler {
    pub fn new(fetcher: Arc<dyn Fetcher>, history: Arc<HistoryRing>) -> Self {
        Self { fetcher, history, handles: Mutex::new(HashMap::new()) }
    }

    /// Start probing a monitor: one probe right away, then one per jittered
    /// delay. Restarts the schedule if the monitor is already active.
    pub fn start(&self, monitor: &Monitor) {
        let mut handles = self.handles.lock();

        if let Some(previous) = handles.remove(&monitor.id) {
            debug!(monitor_id = monitor.id, "Restarting monitor schedule");
            previous.token.cancel();
        }

        let token = CancellationToken::new();
        let task = MonitorTask {
            monitor: monitor.clone(),
            fetcher: self.fetcher.clone(),
            history: self.history.clone(),
            token: token.clone(),
        };

        let handle = ScheduleHandle { token, task: tokio::spawn(task.run()) };
        handles.insert(monitor.id, handle);
    }

    /// Stop re-arming a monitor. A probe already in flight is left to finish
    /// but its record is discarded.
    pub fn stop(&self, id: MonitorId) -> bool {
        match self.handles.lock().remove(&id) {
            Some(handle) => {
                handle.token.cancel();
                true
            }
            None => false,
        }
    }

    /// A monitor is active while its handle is registered and its task is
    /// still running
    pub fn is_active(&self, id: MonitorId) -> bool {
        self.handles.lock().get(&id).is_some_and(|handle| !handle.task.is_finished())
    }

    pub fn active_count(&self) -> usize {
        self.handles.lock().len()
    }

    /// Stop every schedule
    pub fn shutdown(&self) {
        for (_, handle) in self.handles.lock().drain() {
            handle.token.cancel();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct MonitorTask {
    monitor: Monitor,
    fetcher: Arc<dyn Fetcher>,
    history: Arc<HistoryRing>,
    token: CancellationToken,
}

impl MonitorTask {
    async fn run(self) {
        let mut state = ScheduleState::Firing;

        loop {
            state = match state {
                ScheduleState::Firing => self.fire().await,
                ScheduleState::Armed(delay) => {
                    tokio::select! {
                        biased;
                        () = self.token.cancelled() => ScheduleState::Stopped,
                        () = tokio::time::sleep(delay) => ScheduleState::Firing,
                    }
                }
                ScheduleState::Stopped => break,
            };
        }

        debug!(monitor_id = self.monitor.id, "Monitor schedule stopped");
    }

    async fn fire(&self) -> ScheduleState {
        if self.token.is_cancelled() {
            return ScheduleState::Stopped;
        }

        let fetcher = self.fetcher.clone();
        let url = self.monitor.url.clone();
        let record = match tokio::spawn(async move { fetcher.fetch(&url).await }).await {
            Ok(record) => record,
            Err(e) => {
                warn!(monitor_id = self.monitor.id, "Probe task failed: {e}");
                ProbeRecord::failure(format!("probe task failed: {e}"))
            }
        };

        if record.is_failure() {
            warn!(monitor_id = self.monitor.id, url = %self.monitor.url, "{}", record.response);
        } else {
            debug!(
                monitor_id = self.monitor.id,
                url = %self.monitor.url,
                status_code = record.status_code,
                "Probe completed"
            );
        }

        // The monitor may have been stopped while the probe was in flight;
        // the token is checked under the history lock.
        if !self.history.append_if(self.monitor.id, record, || !self.token.is_cancelled()) {
            debug!(monitor_id = self.monitor.id, "Discarding probe result of stopped monitor");
            return ScheduleState::Stopped;
        }

        ScheduleState::Armed(jittered_delay(self.monitor.min_interval, self.monitor.max_interval))
    }
}

/// Draw a delay uniformly from `[min_secs, max_secs]`
pub fn jittered_delay(min_secs: u64, max_secs: u64) -> Duration {
    let span = max_secs.saturating_sub(min_secs) as f64;
    let jitter = if span > 0.0 { rand::thread_rng().gen_range(0.0..=span) } else { 0.0 };

    // Saturates instead of overflowing for bounds near `u64::MAX`.
    Duration::from_secs(min_secs)
        .saturating_add(Duration::try_from_secs_f64(jitter).unwrap_or(Duration::MAX))
}
