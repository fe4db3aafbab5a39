//! API request bodies

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{engine::StartTimer, state::PomodoroPhase, utils::timestamp};

/// Body of POST /api/timer/active
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub initial_time: Option<u64>,
    #[serde(default)]
    pub pomodoro_state: Option<PomodoroPhase>,
    #[serde(default)]
    pub session_count: Option<u32>,
    #[serde(default, with = "timestamp::option")]
    pub session_start_time: Option<DateTime<Utc>>,
}

impl From<StartTimerRequest> for StartTimer {
    fn from(request: StartTimerRequest) -> Self {
        Self {
            mode: request.mode,
            initial_time: request.initial_time.unwrap_or(0),
            pomodoro_state: request.pomodoro_state,
            session_count: request.session_count,
            session_start_time: request.session_start_time,
        }
    }
}
