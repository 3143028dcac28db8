//! Background tasks module
//!
//! This module contains the countdown ticker driven by the engine and the
//! task that logs countdown transitions.

pub mod countdown_ticker;
pub mod state_logger;

// Re-export main items
pub use countdown_ticker::{Ticker, TICK_INTERVAL};
pub use state_logger::state_logger_task;
