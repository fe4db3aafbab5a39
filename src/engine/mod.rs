//! Timer operations over the document store
//!
//! This module contains the active timer engine and the session log and
//! settings services that share its HTTP surface.

pub mod sessions;
pub mod settings;
pub mod timer;

// Re-export main types
pub use sessions::SessionService;
pub use settings::SettingsService;
pub use timer::{StartTimer, TimerEngine};
