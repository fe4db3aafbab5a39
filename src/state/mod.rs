//! State management module
//!
//! This module contains the persisted document types and the shared
//! application state.

pub mod app_state;
pub mod session;
pub mod settings;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use session::{DateBucket, SessionLog, TimerSession, TimerStats};
pub use settings::{PomodoroSettings, TimerSettings};
pub use timer_state::{PomodoroPhase, TimerMode, TimerState};
