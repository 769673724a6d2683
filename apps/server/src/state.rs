use std::path::{Path, PathBuf};

use crate::monitoring::MonitorService;
use crate::store::{MessageLog, UserStore};

/// Everything the handlers share, wrapped in `web::Data` once per server
pub struct AppState {
    pub users: UserStore,
    pub messages: MessageLog,
    pub monitors: MonitorService,
    static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(monitors: MonitorService) -> Self {
        Self { users: UserStore::seeded(), messages: MessageLog::new(), monitors, static_dir: None }
    }

    pub fn with_static_dir(mut self, static_dir: Option<PathBuf>) -> Self {
        self.static_dir = static_dir;
        self
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }
}
