//! Timer settings operations

use std::sync::{Arc, Mutex};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    state::TimerSettings,
    store::DocumentStore,
};

pub const SETTINGS_KEY: &str = "timer_settings";

pub struct SettingsService {
    store: Arc<dyn DocumentStore>,
    write_lock: Mutex<()>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Stored settings with defaults filled in. Defaults are not written back.
    pub fn get(&self) -> AppResult<Value> {
        let stored = self.store.load(SETTINGS_KEY)?.unwrap_or_else(|| Value::Object(Map::new()));
        Ok(TimerSettings::fill_defaults(stored))
    }

    /// Replace the settings document with `settings` as sent
    pub fn update(&self, settings: Value) -> AppResult<Value> {
        if !settings.is_object() {
            return Err(AppError::BadRequest("Settings must be a JSON object".to_string()));
        }

        let _guard = self.write_lock.lock().map_err(|e| AppError::lock("settings", e))?;
        self.store.save(SETTINGS_KEY, &settings)?;
        info!("Timer settings updated: {}", settings);
        Ok(settings)
    }
}
