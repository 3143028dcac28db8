//! Timer state structure and the duration editing rules

use serde::{Deserialize, Serialize};

/// Smallest total duration the timer can be dialed to, in seconds
pub const MIN_TOTAL_TIME: u64 = 0;
/// Largest total duration the timer can be dialed to (24 hours), in seconds
pub const MAX_TOTAL_TIME: u64 = 86_400;

/// Which component of the total duration an adjustment affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Number of seconds one adjustment step of this unit represents
    pub fn seconds(self) -> u64 {
        match self {
            TimeUnit::Hours => 3600,
            TimeUnit::Minutes => 60,
            TimeUnit::Seconds => 1,
        }
    }
}

/// Sign of a duration adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

/// Immutable snapshot of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Dialed-in duration in seconds
    pub total_time: u64,
    /// Seconds left in the current countdown; only meaningful while running
    pub remaining_time: u64,
    pub is_running: bool,
}

impl TimerState {
    /// Create the idle, zero-length state every engine starts from
    pub fn new() -> Self {
        Self {
            total_time: 0,
            remaining_time: 0,
            is_running: false,
        }
    }

    /// Total time after stepping `unit` once in `direction`, clamped to the valid range
    pub fn adjusted_total(&self, unit: TimeUnit, direction: ChangeDirection) -> u64 {
        let step = unit.seconds();
        let total = match direction {
            ChangeDirection::Increase => self.total_time.saturating_add(step),
            ChangeDirection::Decrease => self.total_time.saturating_sub(step),
        };
        total.clamp(MIN_TOTAL_TIME, MAX_TOTAL_TIME)
    }

    /// Seconds the presentation should show: remaining while running, total otherwise
    pub fn displayed_seconds(&self) -> u64 {
        if self.is_running {
            self.remaining_time
        } else {
            self.total_time
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_steps() {
        let state = TimerState::new();
        assert_eq!(state.adjusted_total(TimeUnit::Hours, ChangeDirection::Increase), 3600);
        assert_eq!(state.adjusted_total(TimeUnit::Minutes, ChangeDirection::Increase), 60);
        assert_eq!(state.adjusted_total(TimeUnit::Seconds, ChangeDirection::Increase), 1);
    }

    #[test]
    fn adjustments_clamp_at_both_ends() {
        let empty = TimerState::new();
        assert_eq!(empty.adjusted_total(TimeUnit::Hours, ChangeDirection::Decrease), 0);

        let full = TimerState {
            total_time: MAX_TOTAL_TIME,
            ..TimerState::new()
        };
        assert_eq!(full.adjusted_total(TimeUnit::Seconds, ChangeDirection::Increase), MAX_TOTAL_TIME);

        let almost_full = TimerState {
            total_time: MAX_TOTAL_TIME - 30,
            ..TimerState::new()
        };
        assert_eq!(almost_full.adjusted_total(TimeUnit::Minutes, ChangeDirection::Increase), MAX_TOTAL_TIME);

        let short = TimerState {
            total_time: 90,
            ..TimerState::new()
        };
        assert_eq!(short.adjusted_total(TimeUnit::Hours, ChangeDirection::Decrease), 0);
    }

    #[test]
    fn displayed_seconds_follows_running_flag() {
        let mut state = TimerState {
            total_time: 125,
            remaining_time: 40,
            is_running: true,
        };
        assert_eq!(state.displayed_seconds(), 40);
        state.is_running = false;
        assert_eq!(state.displayed_seconds(), 125);
    }

    #[test]
    fn enums_use_lowercase_names() {
        assert_eq!(serde_json::to_string(&TimeUnit::Minutes).unwrap(), "\"minutes\"");
        let direction: ChangeDirection = serde_json::from_str("\"decrease\"").unwrap();
        assert_eq!(direction, ChangeDirection::Decrease);
    }
}
