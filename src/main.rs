//! Udo timer - local-first pomodoro and stopwatch backend
//!
//! This is the main entry point for the udo-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use udo_timer::{api::create_router, config::Config, state::AppState, utils::shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("udo_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting udo-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, data_dir={}",
        config.host,
        config.port,
        config.data_dir.display()
    );

    let state = AppState::open(&config.data_dir)?.with_frontend_dir(config.frontend_dir.clone());
    let app = create_router(Arc::new(state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET/POST/PUT/DELETE /api/timer/active  - Read, start, pause, stop the timer");
    info!("  GET/POST /api/timer/sessions           - Session log");
    info!("  DELETE   /api/timer/sessions/:id       - Delete a session");
    info!("  GET/PUT  /api/timer/settings           - Pomodoro settings");
    info!("  GET      /api/timer/stats              - Session statistics");
    info!("  GET      /api/health                   - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
