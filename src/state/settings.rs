//! Timer settings document
//!
//! Settings are stored exactly as the client sent them. The typed structs
//! only supply defaults for keys the stored document lacks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pomodoro phase lengths, all in minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroSettings {
    pub study_time: u32,
    pub break_time: u32,
    pub long_break_time: u32,
    pub sessions_before_long_break: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            study_time: 25,
            break_time: 5,
            long_break_time: 15,
            sessions_before_long_break: 4,
        }
    }
}

/// Persisted timer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub pomodoro: PomodoroSettings,
}

impl TimerSettings {
    /// Stored settings with any missing keys filled from the defaults.
    /// Stored values always win, including keys the defaults do not know.
    pub fn fill_defaults(stored: Value) -> Value {
        let mut merged = serde_json::to_value(Self::default()).unwrap_or(Value::Object(Map::new()));
        merge(&mut merged, stored);
        merged
    }
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_classic_pomodoro() {
        assert_eq!(
            serde_json::to_value(TimerSettings::default()).unwrap(),
            json!({"pomodoro": {
                "studyTime": 25,
                "breakTime": 5,
                "longBreakTime": 15,
                "sessionsBeforeLongBreak": 4
            }})
        );
    }

    #[test]
    fn partial_document_fills_defaults() {
        let settings: TimerSettings =
            serde_json::from_value(json!({"pomodoro": {"studyTime": 50}})).unwrap();
        assert_eq!(settings.pomodoro.study_time, 50);
        assert_eq!(settings.pomodoro.break_time, 5);
        assert_eq!(settings.pomodoro.sessions_before_long_break, 4);
    }

    #[test]
    fn fill_defaults_keeps_unknown_and_fractional_values() {
        let merged = TimerSettings::fill_defaults(json!({
            "pomodoro": {"studyTime": 0.5, "autoStartBreaks": true},
            "soundEnabled": false,
        }));
        assert_eq!(merged["pomodoro"]["studyTime"], 0.5);
        assert_eq!(merged["pomodoro"]["autoStartBreaks"], true);
        assert_eq!(merged["pomodoro"]["breakTime"], 5);
        assert_eq!(merged["soundEnabled"], false);
    }

    #[test]
    fn fill_defaults_of_empty_object_is_default() {
        assert_eq!(
            TimerSettings::fill_defaults(json!({})),
            serde_json::to_value(TimerSettings::default()).unwrap()
        );
    }
}
