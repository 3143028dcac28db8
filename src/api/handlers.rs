//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::{AppState, TimerView};
use super::responses::{AdjustRequest, ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /adjust - Step one unit of the total duration
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    // Pickers are disabled while the countdown runs
    if state.engine.current_state().is_running {
        warn!("Rejected {:?} {:?} adjustment while running", request.unit, request.direction);
        return Err(StatusCode::CONFLICT);
    }

    state.engine.adjust_total_time(request.unit, request.direction);
    state.record_action("adjust");

    let timer_state = state.engine.current_state();
    Ok(Json(ApiResponse::new(
        format!("Total time set to {}s", timer_state.total_time),
        timer_state,
    )))
}

/// Handle POST /start - Start or restart the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.engine.start();
    state.record_action("start");
    info!("Start endpoint called");

    let timer_state = state.engine.current_state();
    let message = if timer_state.is_running {
        "Countdown started"
    } else {
        "Countdown has no duration, nothing to run"
    };
    Json(ApiResponse::new(message.to_string(), timer_state))
}

/// Handle POST /stop - Stop the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.engine.stop();
    state.record_action("stop");
    info!("Stop endpoint called");

    Json(ApiResponse::new(
        "Countdown stopped".to_string(),
        state.engine.current_state(),
    ))
}

/// Handle GET /state - Return the current timer state and its rendering
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer_state = state.engine.current_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        state: timer_state,
        view: TimerView::from(&timer_state),
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream every state change as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let states = state.engine.observe_state();

    let events = stream::unfold(states, |mut states| async move {
        let timer_state = states.next().await?;
        let event = match serde_json::to_string(&TimerView::from(&timer_state)) {
            Ok(data) => Event::default().event("state").data(data),
            Err(e) => {
                error!("Failed to serialize timer view: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };
        Some((Ok(event), states))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
