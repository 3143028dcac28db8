//! HTTP API module
//!
//! This module contains the HTTP control surface for the timer: command
//! endpoints, state queries, and a server-sent event stream.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/adjust", post(adjust_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/state", get(state_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
