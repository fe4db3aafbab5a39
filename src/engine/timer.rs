//! Active timer engine
//!
//! The engine keeps no timer state of its own. Every operation loads the
//! active-timer document, derives the displayed value from the persisted
//! start instant and the clock, and writes the result back. A read after a
//! process restart therefore gives the same answer as one before it.

use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    state::{PomodoroPhase, TimerMode, TimerState},
    store::{load_as, save_as, DocumentStore},
};

/// Document key of the active timer slot
pub const ACTIVE_TIMER_KEY: &str = "timer_active";

/// Parameters for starting a run segment
#[derive(Debug, Clone, Default)]
pub struct StartTimer {
    pub mode: Option<String>,
    /// Countdown budget in seconds
    pub initial_time: u64,
    pub pomodoro_state: Option<PomodoroPhase>,
    pub session_count: Option<u32>,
    /// Carried over when resuming so the session keeps its original anchor
    pub session_start_time: Option<DateTime<Utc>>,
}

pub struct TimerEngine {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    /// Serializes read-modify-write cycles on the active timer document
    write_lock: Mutex<()>,
}

impl TimerEngine {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> AppResult<TimerState> {
        Ok(load_as::<TimerState>(self.store.as_ref(), ACTIVE_TIMER_KEY)?.unwrap_or_default())
    }

    fn save(&self, state: &TimerState) -> AppResult<()> {
        save_as(self.store.as_ref(), ACTIVE_TIMER_KEY, state)?;
        Ok(())
    }

    /// Current timer with `currentTime` recomputed. Nothing is written.
    pub fn get_state(&self) -> AppResult<TimerState> {
        let state = self.load()?.recomputed(self.clock.now());
        debug!(
            "Timer state read: active={}, current_time={:?}",
            state.active, state.current_time
        );
        Ok(state)
    }

    /// Start a new run segment, replacing whatever occupied the slot
    pub fn start(&self, request: StartTimer) -> AppResult<TimerState> {
        let _guard = self.write_lock.lock().map_err(|e| AppError::lock("timer", e))?;

        let now = self.clock.now();
        let mode = TimerMode::from_name(request.mode.as_deref());
        let state = TimerState::running(
            mode,
            request.initial_time,
            request.pomodoro_state.unwrap_or_default(),
            request.session_count.unwrap_or(0),
            request.session_start_time.unwrap_or(now),
            now,
        );

        self.save(&state)?;
        info!(
            "Timer started: mode={:?}, initial_time={}s, phase={:?}",
            mode, request.initial_time, state.pomodoro_state
        );
        Ok(state)
    }

    /// Freeze the timer at its current value
    pub fn pause(&self) -> AppResult<TimerState> {
        let _guard = self.write_lock.lock().map_err(|e| AppError::lock("timer", e))?;

        let mut state = self.load()?;
        state.recompute(self.clock.now());
        state.active = false;

        self.save(&state)?;
        info!("Timer paused at {:?}s", state.current_time);
        Ok(state)
    }

    /// Reset the slot to `{"active": false}`. Does not log a session.
    pub fn stop(&self) -> AppResult<TimerState> {
        let _guard = self.write_lock.lock().map_err(|e| AppError::lock("timer", e))?;

        let state = TimerState::idle();
        self.save(&state)?;
        info!("Timer stopped");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use axum::http::StatusCode;

    use crate::{
        clock::testing::ManualClock,
        store::{JsonFileStore, MemoryStore},
    };

    fn engine() -> (Arc<MemoryStore>, Arc<ManualClock>, TimerEngine) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new());
        let engine = TimerEngine::new(store.clone(), clock.clone());
        (store, clock, engine)
    }

    fn stopwatch() -> StartTimer {
        StartTimer {
            mode: Some("stopwatch".into()),
            ..Default::default()
        }
    }

    fn pomodoro(budget: u64) -> StartTimer {
        StartTimer {
            mode: Some("pomodoro".into()),
            initial_time: budget,
            pomodoro_state: Some(PomodoroPhase::Study),
            ..Default::default()
        }
    }

    #[test]
    fn fresh_install_reads_idle_without_writing() {
        let (store, _clock, engine) = engine();
        assert_eq!(engine.get_state().unwrap(), TimerState::idle());
        assert!(store.load(ACTIVE_TIMER_KEY).unwrap().is_none());
    }

    #[test]
    fn stopwatch_scenario() {
        let (_store, clock, engine) = engine();
        let started = engine.start(stopwatch()).unwrap();
        assert!(started.active);
        assert_eq!(started.current_time, Some(0));
        assert_eq!(started.completed, Some(false));

        clock.advance_secs(3);
        let state = engine.get_state().unwrap();
        assert_eq!(state.current_time, Some(3));
        assert!(state.active);

        clock.advance_secs(2);
        let paused = engine.pause().unwrap();
        assert_eq!(paused.current_time, Some(5));
        assert!(!paused.active);

        clock.advance_secs(5);
        assert_eq!(engine.get_state().unwrap().current_time, Some(5));
    }

    #[test]
    fn pomodoro_completes_lazily_after_expiry() {
        let (store, clock, engine) = engine();
        engine.start(pomodoro(10)).unwrap();

        clock.advance_secs(12);
        let state = engine.get_state().unwrap();
        assert_eq!(state.current_time, Some(0));
        assert!(!state.active);
        assert_eq!(state.completed, Some(true));

        // The read did not persist the completion
        let stored = store.load(ACTIVE_TIMER_KEY).unwrap().unwrap();
        assert_eq!(stored["active"], true);
    }

    #[test]
    fn reads_are_idempotent_within_a_second() {
        let (_store, clock, engine) = engine();
        engine.start(stopwatch()).unwrap();
        clock.advance_millis(7_200);

        let first = engine.get_state().unwrap();
        clock.advance_millis(300);
        let second = engine.get_state().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stopwatch_is_monotonic() {
        let (_store, clock, engine) = engine();
        engine.start(stopwatch()).unwrap();

        let mut last = 0;
        for step in [400, 900, 1_500, 60_000] {
            clock.advance_millis(step);
            let current = engine.get_state().unwrap().current_time.unwrap();
            assert!(current >= last);
            last = current;
        }
    }

    #[test]
    fn restart_yields_same_reading() {
        let (store, clock, engine) = engine();
        engine.start(pomodoro(1500)).unwrap();
        clock.advance_secs(42);
        let before = engine.get_state().unwrap();

        let restarted = TimerEngine::new(store, clock);
        assert_eq!(restarted.get_state().unwrap(), before);
        assert_eq!(before.current_time, Some(1458));
    }

    #[test]
    fn start_overwrites_unfinished_timer() {
        let (_store, clock, engine) = engine();
        engine.start(pomodoro(1500)).unwrap();
        clock.advance_secs(100);

        let state = engine.start(stopwatch()).unwrap();
        assert_eq!(state.mode, Some(TimerMode::Stopwatch));
        assert_eq!(state.start_time, Some(clock.now()));
        assert_eq!(state.session_start_time, Some(clock.now()));
    }

    #[test]
    fn resume_keeps_session_anchor_and_carry_over() {
        let (_store, clock, engine) = engine();
        let first = engine.start(pomodoro(1500)).unwrap();
        clock.advance_secs(600);
        let paused = engine.pause().unwrap();
        clock.advance_secs(60);

        let resumed = engine
            .start(StartTimer {
                mode: Some("pomodoro".into()),
                initial_time: paused.current_time.unwrap(),
                pomodoro_state: paused.pomodoro_state,
                session_count: Some(2),
                session_start_time: paused.session_start_time,
            })
            .unwrap();

        assert_eq!(resumed.session_start_time, first.session_start_time);
        assert_eq!(resumed.start_time, Some(clock.now()));
        assert_eq!(resumed.current_time, Some(900));
        assert_eq!(resumed.session_count, Some(2));
    }

    #[test]
    fn missing_mode_starts_pomodoro() {
        let (_store, _clock, engine) = engine();
        let state = engine
            .start(StartTimer {
                initial_time: 300,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.mode, Some(TimerMode::Pomodoro));
        assert_eq!(state.pomodoro_state, Some(PomodoroPhase::Study));
        assert_eq!(state.session_count, Some(0));
    }

    #[test]
    fn pause_on_inactive_timer_is_idempotent() {
        let (_store, clock, engine) = engine();
        engine.start(stopwatch()).unwrap();
        clock.advance_secs(8);
        let first = engine.pause().unwrap();

        clock.advance_secs(30);
        let second = engine.pause().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn pause_after_study_expiry_reports_completion() {
        let (store, clock, engine) = engine();
        engine.start(pomodoro(10)).unwrap();
        clock.advance_secs(25);

        let paused = engine.pause().unwrap();
        assert_eq!(paused.current_time, Some(0));
        assert!(!paused.active);
        assert_eq!(paused.completed, Some(true));

        let stored = store.load(ACTIVE_TIMER_KEY).unwrap().unwrap();
        assert_eq!(stored["completed"], true);
        assert_eq!(stored["active"], false);
    }

    #[test]
    fn pause_on_idle_slot_stays_idle() {
        let (_store, _clock, engine) = engine();
        assert_eq!(engine.pause().unwrap(), TimerState::idle());
    }

    #[test]
    fn stop_persists_only_active_false() {
        let (store, clock, engine) = engine();
        engine.start(pomodoro(1500)).unwrap();
        clock.advance_secs(5);

        assert_eq!(engine.stop().unwrap(), TimerState::idle());
        assert_eq!(store.load(ACTIVE_TIMER_KEY).unwrap(), Some(json!({"active": false})));
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let (store, _clock, engine) = engine();
        store.save(ACTIVE_TIMER_KEY, &json!({"active": "yes"})).unwrap();

        let err = engine.get_state().unwrap_err();
        assert!(matches!(err, AppError::Store(crate::store::StoreError::Corrupt { .. })));
    }

    #[test]
    fn unreadable_document_is_a_server_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory where the document file should be cannot be read
        std::fs::create_dir(dir.path().join("timer_active.json")).unwrap();

        let store = Arc::new(JsonFileStore::open(dir.path()).unwrap());
        let engine = TimerEngine::new(store, Arc::new(ManualClock::new()));

        let err = engine.get_state().unwrap_err();
        assert!(matches!(err, AppError::Store(crate::store::StoreError::Io { .. })));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
