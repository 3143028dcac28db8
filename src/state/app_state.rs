//! Main application state shared by the HTTP handlers

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use tracing::warn;

use super::TimerEngine;

/// Application state: the timer engine plus server metadata
#[derive(Debug)]
pub struct AppState {
    pub engine: TimerEngine,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(engine: TimerEngine) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
        }
    }

    /// Remember the most recent command sent to the engine
    pub fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some((action.to_string(), Utc::now())),
            Err(e) => warn!("Failed to record action {}: {}", action, e),
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let seconds = seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
