//! Values the presentation layer derives from a timer snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimerState;

/// A duration split into clock components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DisplayTime {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn as_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m {:02}s", self.hours, self.minutes, self.seconds)
    }
}

/// Everything a screen needs to render one state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub time: DisplayTime,
    /// Whether the unit pickers accept adjustments
    pub editable: bool,
    /// Fraction of the progress circle to sweep, in `[0.0, 1.0]`
    pub progress: f64,
    pub is_running: bool,
}

impl From<&TimerState> for TimerView {
    fn from(state: &TimerState) -> Self {
        let progress = if state.is_running && state.total_time > 0 {
            state.remaining_time as f64 / state.total_time as f64
        } else {
            0.0
        };

        Self {
            time: DisplayTime::from_seconds(state.displayed_seconds()),
            editable: !state.is_running,
            progress,
            is_running: state.is_running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MAX_TOTAL_TIME;

    #[test]
    fn split_recombines_for_every_duration() {
        for total in 0..=MAX_TOTAL_TIME {
            let time = DisplayTime::from_seconds(total);
            assert!(time.minutes < 60 && time.seconds < 60);
            assert_eq!(time.as_seconds(), total);
        }
    }

    #[test]
    fn full_day_shows_as_twenty_four_hours() {
        let time = DisplayTime::from_seconds(MAX_TOTAL_TIME);
        assert_eq!((time.hours, time.minutes, time.seconds), (24, 0, 0));
        assert_eq!(DisplayTime::from_seconds(3725).to_string(), "1h 02m 05s");
    }

    #[test]
    fn idle_view_shows_total_and_is_editable() {
        let state = TimerState {
            total_time: 125,
            remaining_time: 7,
            is_running: false,
        };
        let view = TimerView::from(&state);
        assert_eq!(view.time.as_seconds(), 125);
        assert!(view.editable);
        assert_eq!(view.progress, 0.0);
    }

    #[test]
    fn running_view_shows_remaining_and_sweep() {
        let state = TimerState {
            total_time: 40,
            remaining_time: 10,
            is_running: true,
        };
        let view = TimerView::from(&state);
        assert_eq!(view.time.as_seconds(), 10);
        assert!(!view.editable);
        assert_eq!(view.progress, 0.25);
    }
}
