/// URL monitoring: periodic background probes of external URLs
///
/// This module is responsible for:
/// - Fetching a target URL once and recording the outcome
/// - Keeping a bounded, newest-first history per monitor
/// - Re-arming each monitor after a jittered delay until it is stopped
pub mod fetcher;
pub mod history;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod types;

pub use fetcher::{Fetcher, HttpFetcher};
pub use registry::MonitorError;
pub use service::MonitorService;
pub use types::{Monitor, MonitorId, MonitorSnapshot, NewMonitor, ProbeRecord};

/// Timeout of a single probe, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Records kept per monitor, not configurable
pub const HISTORY_CAPACITY: usize = 10;

/// Characters of the response body kept in a record
pub const DEFAULT_SNIPPET_LENGTH: usize = 500;
