//! State management module
//!
//! This module contains the timer state, its publish/subscribe channel, the
//! engine that drives it, and the values a screen derives from it.

pub mod app_state;
pub mod channel;
pub mod display;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use channel::{StateChannel, StateStream};
pub use display::{DisplayTime, TimerView};
pub use timer_engine::TimerEngine;
pub use timer_state::{ChangeDirection, TimeUnit, TimerState, MAX_TOTAL_TIME, MIN_TOTAL_TIME};
