//! Active timer document and its wall-clock recomputation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::timestamp;

/// Counting direction of the active timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Stopwatch,
    Pomodoro,
}

impl TimerMode {
    /// Map a requested mode name, falling back to pomodoro for anything unknown
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("stopwatch") => TimerMode::Stopwatch,
            _ => TimerMode::Pomodoro,
        }
    }
}

/// Pomodoro phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroPhase {
    #[default]
    Study,
    Break,
    LongBreak,
}

/// The single persisted active-timer document.
///
/// While `active` is true, `current_time` is only a cache and must be
/// recomputed from `start_time` before it is shown. Once paused it is frozen.
/// The idle document carries nothing but `active: false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimerMode>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub session_start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pomodoro_state: Option<PomodoroPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_count: Option<u32>,
    /// Countdown budget in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_time: Option<u64>,
    /// Display value in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TimerState {
    /// The idle slot: `{"active": false}`
    pub fn idle() -> Self {
        Self::default()
    }

    /// A freshly started run segment
    pub fn running(
        mode: TimerMode,
        initial_time: u64,
        pomodoro_state: PomodoroPhase,
        session_count: u32,
        session_start_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            active: true,
            mode: Some(mode),
            start_time: Some(now),
            session_start_time: Some(session_start_time),
            pomodoro_state: Some(pomodoro_state),
            session_count: Some(session_count),
            initial_time: Some(initial_time),
            current_time: Some(initial_time),
            completed: Some(false),
        }
    }

    /// Whole seconds since `start_time`, truncated and never negative
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        match self.start_time {
            Some(start) => u64::try_from((now - start).num_seconds()).unwrap_or(0),
            None => 0,
        }
    }

    /// Bring `current_time` up to date with `now`.
    ///
    /// A pomodoro study countdown that has run out is paused and flagged
    /// `completed`. Phase advance is left to whoever starts the next timer.
    pub fn recompute(&mut self, now: DateTime<Utc>) {
        if !self.active {
            return;
        }

        let elapsed = self.elapsed_seconds(now);
        match self.mode.unwrap_or(TimerMode::Pomodoro) {
            TimerMode::Pomodoro => {
                let remaining = self.initial_time.unwrap_or(0).saturating_sub(elapsed);
                self.current_time = Some(remaining);

                if remaining == 0 && self.pomodoro_state.unwrap_or_default() == PomodoroPhase::Study {
                    self.active = false;
                    self.completed = Some(true);
                }
            }
            TimerMode::Stopwatch => {
                self.current_time = Some(elapsed);
            }
        }
    }

    /// Recomputed copy of this state
    pub fn recomputed(mut self, now: DateTime<Utc>) -> Self {
        self.recompute(now);
        self
    }
}
