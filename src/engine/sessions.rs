//! Timer session log operations

use std::sync::{Arc, Mutex};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    state::{SessionLog, TimerSession, TimerStats},
    store::{load_as, save_as, DocumentStore},
};

pub const SESSIONS_KEY: &str = "timer_sessions";

/// Fields a new session must carry
const REQUIRED_FIELDS: &[&str] = &["duration", "startTime"];

pub struct SessionService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl SessionService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> AppResult<SessionLog> {
        Ok(load_as::<SessionLog>(self.store.as_ref(), SESSIONS_KEY)?.unwrap_or_default())
    }

    fn save(&self, log: &SessionLog) -> AppResult<()> {
        save_as(self.store.as_ref(), SESSIONS_KEY, log)?;
        Ok(())
    }

    pub fn list(&self) -> AppResult<Vec<TimerSession>> {
        Ok(self.load()?.sessions)
    }

    /// Append a session built from a caller-supplied JSON object
    pub fn create(&self, body: Value) -> AppResult<TimerSession> {
        let fields: Map<String, Value> = match body {
            Value::Object(fields) => fields,
            _ => return Err(AppError::BadRequest("Session must be a JSON object".to_string())),
        };

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return Err(AppError::BadRequest(format!("Missing required field: {}", missing)));
        }

        let _guard = self.write_lock.lock().map_err(|e| AppError::lock("sessions", e))?;
        let mut log = self.load()?;

        let id = log.allocate_id();
        let session = TimerSession::new(id, self.clock.now(), fields);
        log.sessions.push(session.clone());
        self.save(&log)?;

        info!("Logged timer session {} ({}s)", session.id, session.duration());
        Ok(session)
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().map_err(|e| AppError::lock("sessions", e))?;
        let mut log = self.load()?;

        if !log.remove(id) {
            return Err(AppError::NotFound(format!("Session not found: {}", id)));
        }

        self.save(&log)?;
        info!("Deleted timer session {}", id);
        Ok(())
    }

    pub fn stats(&self) -> AppResult<TimerStats> {
        Ok(self.load()?.stats())
    }
}
