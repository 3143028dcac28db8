//! State logger background task

use tracing::{debug, info};

use crate::state::{DisplayTime, StateStream, TimerState};

/// Transition between two consecutive snapshots worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Stopped,
    Finished,
    Adjusted,
}

/// Classify what happened between `previous` and `current`
pub fn classify(previous: &TimerState, current: &TimerState) -> Option<Transition> {
    match (previous.is_running, current.is_running) {
        (false, true) => Some(Transition::Started),
        // ticks always leave remaining below total, so a full countdown with an unchanged total is a restart
        (true, true)
            if current.remaining_time == current.total_time
                && current.total_time == previous.total_time =>
        {
            Some(Transition::Started)
        }
        (true, false) if current.remaining_time == 0 => Some(Transition::Finished),
        (true, false) => Some(Transition::Stopped),
        _ if current.total_time != previous.total_time => Some(Transition::Adjusted),
        _ => None,
    }
}

/// Background task that logs countdown transitions until the engine goes away
pub async fn state_logger_task(mut states: StateStream) {
    info!("Starting state logger task");

    let Some(mut previous) = states.next().await else {
        return;
    };

    while let Some(current) = states.next().await {
        match classify(&previous, &current) {
            Some(Transition::Started) => {
                info!("Countdown running: {}", DisplayTime::from_seconds(current.remaining_time));
            }
            Some(Transition::Stopped) => {
                info!("Countdown stopped at {}", DisplayTime::from_seconds(current.remaining_time));
            }
            Some(Transition::Finished) => info!("Countdown complete"),
            Some(Transition::Adjusted) => {
                debug!("Duration set to {}", DisplayTime::from_seconds(current.total_time));
            }
            None => {}
        }
        previous = current;
    }

    debug!("State stream closed, state logger exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ChangeDirection, TimeUnit, TimerEngine};
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    fn state(total_time: u64, remaining_time: u64, is_running: bool) -> TimerState {
        TimerState {
            total_time,
            remaining_time,
            is_running,
        }
    }

    #[test]
    fn classifies_transitions() {
        assert_eq!(classify(&state(10, 0, false), &state(10, 10, true)), Some(Transition::Started));
        assert_eq!(classify(&state(10, 4, true), &state(10, 10, true)), Some(Transition::Started));
        assert_eq!(classify(&state(10, 10, true), &state(10, 10, true)), Some(Transition::Started));
        assert_eq!(classify(&state(10, 1, true), &state(10, 0, false)), Some(Transition::Finished));
        assert_eq!(classify(&state(10, 6, true), &state(10, 6, false)), Some(Transition::Stopped));
        assert_eq!(classify(&state(10, 0, false), &state(70, 0, false)), Some(Transition::Adjusted));
        assert_eq!(classify(&state(10, 6, true), &state(70, 6, true)), Some(Transition::Adjusted));
    }

    #[test]
    fn ticks_and_repeated_stops_are_quiet() {
        assert_eq!(classify(&state(10, 6, true), &state(10, 5, true)), None);
        assert_eq!(classify(&state(10, 6, false), &state(10, 6, false)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn logger_runs_until_engine_is_dropped() {
        let engine = TimerEngine::new();
        engine.adjust_total_time(TimeUnit::Seconds, ChangeDirection::Increase);
        engine.adjust_total_time(TimeUnit::Seconds, ChangeDirection::Increase);
        let logger = tokio::spawn(state_logger_task(engine.observe_state()));

        engine.start();
        sleep(Duration::from_millis(500)).await;
        engine.start();
        sleep(Duration::from_secs(3)).await;
        assert!(!logger.is_finished());
        assert!(!engine.current_state().is_running);

        drop(engine);
        let exited = timeout(Duration::from_secs(1), logger).await;
        assert!(matches!(exited, Ok(Ok(()))));
    }
}
