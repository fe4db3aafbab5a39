//! Timer session log and statistics

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of sessions reported in `recentSessions`
pub const RECENT_SESSIONS: usize = 10;

/// A logged timer run. Everything except `id` and `createdAt` is caller-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSession {
    pub id: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TimerSession {
    /// Build a session from a caller-supplied object, overriding any `id` or `createdAt` in it
    pub fn new(id: String, created_at: DateTime<Utc>, mut fields: Map<String, Value>) -> Self {
        fields.remove("id");
        fields.remove("createdAt");
        Self {
            id,
            created_at: Some(created_at.to_rfc3339()),
            fields,
        }
    }

    /// Duration in seconds, 0 when missing or not a number
    pub fn duration(&self) -> u64 {
        match self.fields.get("duration") {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Raw `startTime` string, empty when missing
    pub fn start_time(&self) -> &str {
        self.fields.get("startTime").and_then(Value::as_str).unwrap_or("")
    }

    /// First 10 characters of `startTime`, the `YYYY-MM-DD` part
    pub fn start_date(&self) -> &str {
        let start = self.start_time();
        start.char_indices().nth(10).map_or(start, |(i, _)| &start[..i])
    }
}

/// The persisted session log document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLog {
    #[serde(default)]
    pub sessions: Vec<TimerSession>,
    /// Next id to hand out; absent in logs written before ids were counter-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u64>,
}

impl SessionLog {
    /// Allocate the next session id. Ids are never reused, even after deletions.
    pub fn allocate_id(&mut self) -> String {
        let next = self.next_id.unwrap_or_else(|| {
            let highest = self
                .sessions
                .iter()
                .filter_map(|s| s.id.parse::<u64>().ok())
                .max()
                .unwrap_or(0);
            highest.max(self.sessions.len() as u64) + 1
        });
        self.next_id = Some(next + 1);
        next.to_string()
    }

    /// Remove a session by id, returning whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        self.sessions.len() != before
    }

    pub fn stats(&self) -> TimerStats {
        let mut sessions_by_date: BTreeMap<String, DateBucket> = BTreeMap::new();
        for session in &self.sessions {
            let bucket = sessions_by_date.entry(session.start_date().to_string()).or_default();
            bucket.count += 1;
            bucket.duration += session.duration();
        }

        let mut recent: Vec<&TimerSession> = self.sessions.iter().collect();
        recent.sort_by(|a, b| b.start_time().cmp(a.start_time()));

        TimerStats {
            total_sessions: self.sessions.len(),
            total_time: self.sessions.iter().map(TimerSession::duration).sum(),
            sessions_by_date,
            recent_sessions: recent.into_iter().take(RECENT_SESSIONS).cloned().collect(),
        }
    }
}

/// Per-day aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBucket {
    pub count: usize,
    pub duration: u64,
}

/// Dashboard statistics over the whole session log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStats {
    pub total_sessions: usize,
    /// Seconds
    pub total_time: u64,
    pub sessions_by_date: BTreeMap<String, DateBucket>,
    pub recent_sessions: Vec<TimerSession>,
}
