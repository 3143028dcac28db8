//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ChangeDirection, TimeUnit, TimerState, TimerView};

/// Body of POST /adjust
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdjustRequest {
    pub unit: TimeUnit,
    pub direction: ChangeDirection,
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub state: TimerState,
    pub view: TimerView,
}

impl ApiResponse {
    /// Create a response whose status reflects whether the countdown is running
    pub fn new(message: String, state: TimerState) -> Self {
        let status = if state.is_running { "running" } else { "idle" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            view: TimerView::from(&state),
            state,
        }
    }
}

/// Status response with the rendered view and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: TimerState,
    pub view: TimerView,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
