//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and request/response structures.

pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/api/timer/active",
            get(get_active_timer)
                .post(start_timer)
                .put(pause_timer)
                .delete(stop_timer),
        )
        .route("/api/timer/sessions", get(list_sessions).post(create_session))
        .route("/api/timer/sessions/:id", delete(delete_session))
        .route("/api/timer/settings", get(get_settings).put(update_settings))
        .route("/api/timer/stats", get(get_stats))
        .route("/api/health", get(health_handler));

    let index = state
        .frontend_dir
        .as_ref()
        .map(|dir| (dir.clone(), dir.join("index.html")));

    // Serve the built frontend, falling back to index.html for client-side routes
    let app = match index {
        Some((dir, index)) if index.is_file() => {
            info!("Serving frontend from {}", dir.display());
            api.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        other => {
            if let Some((dir, _)) = other {
                warn!("No index.html in {}, frontend disabled", dir.display());
            }
            api.route("/", get(root_handler)).fallback(not_found_handler)
        }
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
