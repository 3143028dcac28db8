//! Dial Timer - A single countdown timer driven through an HTTP control surface
//!
//! This is the main entry point for the dial-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use dial_timer::{
    config::Config,
    state::{AppState, TimerEngine},
    api::create_router,
    tasks::state_logger_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dial_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting dial-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let engine = TimerEngine::new();

    // Log countdown transitions in the background
    tokio::spawn(state_logger_task(engine.observe_state()));

    let state = Arc::new(AppState::new(engine.clone()));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /adjust  - Step hours/minutes/seconds up or down");
    info!("  POST /start   - Start or restart the countdown");
    info!("  POST /stop    - Stop the countdown");
    info!("  GET  /state   - Current state and rendered view");
    info!("  GET  /events  - Server-sent stream of state changes");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    engine.stop();
    info!("Server shutdown complete");
    Ok(())
}
