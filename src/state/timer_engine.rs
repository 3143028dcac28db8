//! Countdown engine: owns the timer state and drives it through its commands

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::{debug, info, warn};

use super::{ChangeDirection, StateChannel, StateStream, TimeUnit, TimerState};
use crate::tasks::countdown_ticker::{TickOutcome, Ticker, TICK_INTERVAL};

/// Mutable part of the engine, guarded by a single mutex so commands and ticks are serialized
#[derive(Debug)]
struct Inner {
    state: TimerState,
    ticker: Ticker,
}

#[derive(Debug)]
struct Shared {
    inner: Mutex<Inner>,
    channel: StateChannel,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Timer state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Handle to the countdown engine.
///
/// Clones share the same timer. Commands never fail: adjustments clamp and
/// `stop` on an idle timer only republishes. `start` needs a Tokio runtime
/// because it spawns the tick task.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    shared: Arc<Shared>,
}

impl TimerEngine {
    /// Create an idle engine with a zero duration
    pub fn new() -> Self {
        let state = TimerState::new();
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    ticker: Ticker::new(),
                }),
                channel: StateChannel::new(state),
            }),
        }
    }

    /// Step the total duration by one `unit` in `direction`, clamped to 0..=24h
    pub fn adjust_total_time(&self, unit: TimeUnit, direction: ChangeDirection) {
        let mut inner = self.shared.lock();
        let total_time = inner.state.adjusted_total(unit, direction);

        if inner.state.is_running {
            warn!("Total time adjusted while the countdown is running");
            inner.state.remaining_time = inner.state.remaining_time.min(total_time);
            if inner.state.remaining_time == 0 {
                info!("Total time adjusted to zero, countdown finished");
                inner.ticker.disarm();
                inner.state.is_running = false;
            }
        }
        inner.state.total_time = total_time;

        debug!("Total time adjusted by {:?} {:?} to {}s", unit, direction, total_time);
        self.shared.channel.publish(inner.state);
    }

    /// Begin a fresh countdown from the total duration, restarting if one is already running
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        inner.ticker.disarm();

        let total_time = inner.state.total_time;
        inner.state.remaining_time = total_time;

        if total_time == 0 {
            info!("Countdown started with zero duration, finished immediately");
            inner.state.is_running = false;
            self.shared.channel.publish(inner.state);
            return;
        }

        inner.state.is_running = true;
        let shared = Arc::downgrade(&self.shared);
        let generation = inner
            .ticker
            .arm(TICK_INTERVAL, move |generation| on_tick(&shared, generation));

        info!("Countdown started for {}s (generation {})", total_time, generation);
        self.shared.channel.publish(inner.state);
    }

    /// Cancel the countdown, keeping total and remaining time as they are
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        inner.ticker.disarm();

        if inner.state.is_running {
            info!("Countdown stopped with {}s remaining", inner.state.remaining_time);
        }
        inner.state.is_running = false;
        self.shared.channel.publish(inner.state);
    }

    /// Subscribe to state changes, starting with the current state
    pub fn observe_state(&self) -> StateStream {
        // Held so no publish slips between the replayed value and the live feed.
        let _inner = self.shared.lock();
        self.shared.channel.subscribe()
    }

    /// Latest published state
    pub fn current_state(&self) -> TimerState {
        self.shared.lock().state
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one tick from ticker `generation`
fn on_tick(shared: &Weak<Shared>, generation: u64) -> TickOutcome {
    let Some(shared) = shared.upgrade() else {
        return TickOutcome::Finished;
    };
    let mut inner = shared.lock();

    if inner.ticker.generation() != generation || !inner.state.is_running {
        debug!("Dropping stale tick from generation {}", generation);
        return TickOutcome::Finished;
    }

    inner.state.remaining_time = inner.state.remaining_time.saturating_sub(1);
    debug!("Tick: {}s remaining", inner.state.remaining_time);

    let outcome = if inner.state.remaining_time == 0 {
        info!("Countdown finished");
        inner.state.is_running = false;
        inner.ticker.release();
        TickOutcome::Finished
    } else {
        TickOutcome::Continue
    };

    shared.channel.publish(inner.state);
    outcome
}
