use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;

use super::types::{MonitorId, ProbeRecord};

/// Bounded per-monitor probe history, newest record first.
///
/// A history only exists between [`HistoryRing::create`] and
/// [`HistoryRing::clear`]; appends for any other id are dropped.
pub struct HistoryRing {
    capacity: usize,
    entries: RwLock<HashMap<MonitorId, VecDeque<ProbeRecord>>>,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: RwLock::new(HashMap::new()) }
    }

    /// Install an empty history for a new monitor
    pub fn create(&self, id: MonitorId) {
        self.entries.write().entry(id).or_insert_with(|| VecDeque::with_capacity(self.capacity));
    }

    /// Prepend a record, evicting the oldest ones past capacity.
    ///
    /// Returns `false` when the monitor has no history.
    pub fn append(&self, id: MonitorId, record: ProbeRecord) -> bool {
        self.append_if(id, record, || true)
    }

    /// Like [`HistoryRing::append`], but only when `keep` holds. `keep` is
    /// evaluated under the write lock, so a concurrent [`HistoryRing::clear`]
    /// is either fully before or fully after it.
    pub fn append_if(&self, id: MonitorId, record: ProbeRecord, keep: impl FnOnce() -> bool) -> bool {
        let mut entries = self.entries.write();
        let Some(records) = entries.get_mut(&id) else {
            return false;
        };
        if !keep() {
            return false;
        }

        records.push_front(record);
        records.truncate(self.capacity);
        true
    }

    pub fn get(&self, id: MonitorId) -> Vec<ProbeRecord> {
        self.entries.read().get(&id).map(|records| records.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn clear(&self, id: MonitorId) {
        self.entries.write().remove(&id);
    }
}
