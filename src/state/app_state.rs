//! Shared application state handed to every request handler

use std::{path::PathBuf, sync::Arc, time::Instant};
use tracing::info;

use crate::{
    clock::{Clock, SystemClock},
    engine::{SessionService, SettingsService, TimerEngine},
    store::{DocumentStore, JsonFileStore, StoreResult},
};

/// Services plus server metadata. Holds no timer state of its own.
pub struct AppState {
    pub timer: TimerEngine,
    pub sessions: SessionService,
    pub settings: SettingsService,
    pub clock: Arc<dyn Clock>,
    /// Built frontend to serve, if any
    pub frontend_dir: Option<PathBuf>,
    pub start_time: Instant,
}

impl AppState {
    /// Wire all services to one store and clock
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            timer: TimerEngine::new(Arc::clone(&store), Arc::clone(&clock)),
            sessions: SessionService::new(Arc::clone(&store), Arc::clone(&clock)),
            settings: SettingsService::new(store),
            clock,
            frontend_dir: None,
            start_time: Instant::now(),
        }
    }

    /// State backed by JSON files under `data_dir` and the system clock
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = JsonFileStore::open(data_dir)?;
        info!("Using data directory {}", store.root().display());
        Ok(Self::new(Arc::new(store), Arc::new(SystemClock)))
    }

    pub fn with_frontend_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.frontend_dir = dir;
        self
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
