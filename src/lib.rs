//! Dial Timer - A single countdown timer driven through an HTTP control surface
//!
//! This library provides the countdown engine (duration editing, start/stop,
//! one tick per second, replay-latest state stream) and the presentation
//! adapter that renders its state and forwards commands to it.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ChangeDirection, TimeUnit, TimerEngine, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
