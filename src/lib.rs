//! Udo timer - local-first pomodoro and stopwatch backend
//!
//! The active timer is derived from a persisted start instant on every
//! request, so the server can restart at any point without losing time.
//! Session history and settings live next to it as JSON documents.

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
