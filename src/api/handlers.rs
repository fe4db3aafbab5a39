//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    state::{AppState, TimerSession, TimerState, TimerStats},
};
use super::{
    requests::StartTimerRequest,
    responses::{ErrorResponse, HealthResponse, MessageResponse},
};

/// Unwrap a JSON body, turning extractor failures into 400s with an `{error}` body
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Handle GET /api/timer/active - Current timer with recomputed time
pub async fn get_active_timer(State(state): State<Arc<AppState>>) -> AppResult<Json<TimerState>> {
    Ok(Json(state.timer.get_state()?))
}

/// Handle POST /api/timer/active - Start a timer, replacing any previous one
pub async fn start_timer(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartTimerRequest>, JsonRejection>,
) -> AppResult<Json<TimerState>> {
    let request = json_body(body)?;
    Ok(Json(state.timer.start(request.into())?))
}

/// Handle PUT /api/timer/active - Pause the timer
pub async fn pause_timer(State(state): State<Arc<AppState>>) -> AppResult<Json<TimerState>> {
    Ok(Json(state.timer.pause()?))
}

/// Handle DELETE /api/timer/active - Reset the timer slot
pub async fn stop_timer(State(state): State<Arc<AppState>>) -> AppResult<Json<MessageResponse>> {
    state.timer.stop()?;
    Ok(Json(MessageResponse::new("Timer stopped")))
}

/// Handle GET /api/timer/sessions
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<TimerSession>>> {
    Ok(Json(state.sessions.list()?))
}

/// Handle POST /api/timer/sessions - Log a finished session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TimerSession>)> {
    let session = state.sessions.create(json_body(body)?)?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Handle DELETE /api/timer/sessions/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.sessions.delete(&id)?;
    Ok(Json(MessageResponse::new("Session deleted")))
}

/// Handle GET /api/timer/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    Ok(Json(state.settings.get()?))
}

/// Handle PUT /api/timer/settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let settings = json_body(body)?;
    Ok(Json(state.settings.update(settings)?))
}

/// Handle GET /api/timer/stats - Dashboard aggregates
pub async fn get_stats(State(state): State<Arc<AppState>>) -> AppResult<Json<TimerStats>> {
    Ok(Json(state.sessions.stats()?))
}

/// Handle GET /api/health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime(), state.clock.now()))
}

/// Handle GET / when no frontend build is available
pub async fn root_handler() -> Json<MessageResponse> {
    info!("Root requested without a frontend build");
    Json(MessageResponse::new("Udo backend is running. Frontend not built yet."))
}

/// Fallback for unknown paths when no frontend build is available
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
