//! Countdown ticker background task

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Period between two countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What the tick callback wants the ticker to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Finished,
}

/// Reusable handle to the periodic tick task.
///
/// Every `arm` bumps the generation; the callback receives the generation it
/// was armed with so the owner can drop ticks from a disarmed schedule.
#[derive(Debug, Default)]
pub struct Ticker {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recent `arm`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Start firing `on_tick` every `period`, first at `period` after this call.
    ///
    /// Any previously armed schedule is disarmed first. Must be called from
    /// within a Tokio runtime.
    pub fn arm<F>(&mut self, period: Duration, mut on_tick: F) -> u64
    where
        F: FnMut(u64) -> TickOutcome + Send + 'static,
    {
        self.disarm();
        self.generation += 1;
        let generation = self.generation;
        let first_tick = Instant::now() + period;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(first_tick, period);
            loop {
                interval.tick().await;
                if on_tick(generation) == TickOutcome::Finished {
                    debug!("Ticker generation {} finished", generation);
                    break;
                }
            }
        }));

        generation
    }

    /// Cancel the current schedule. Bumps the generation so a tick already in
    /// flight is recognised as stale.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            self.generation += 1;
            debug!("Ticker disarmed, generation now {}", self.generation);
        }
    }

    /// Forget the task handle without aborting it; used by the tick callback
    /// when the countdown completes on its own.
    pub fn release(&mut self) {
        self.handle = None;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    fn counting(counter: &Arc<AtomicU64>, limit: u64) -> impl FnMut(u64) -> TickOutcome + Send + 'static {
        let counter = Arc::clone(counter);
        move |_| {
            let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if seen >= limit {
                TickOutcome::Finished
            } else {
                TickOutcome::Continue
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period_until_finished() {
        let ticks = Arc::new(AtomicU64::new(0));
        let mut ticker = Ticker::new();
        ticker.arm(TICK_INTERVAL, counting(&ticks, 3));

        sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(!ticker.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_stops_ticks_and_bumps_generation() {
        let ticks = Arc::new(AtomicU64::new(0));
        let mut ticker = Ticker::new();
        let armed = ticker.arm(TICK_INTERVAL, counting(&ticks, u64::MAX));

        sleep(Duration::from_millis(2500)).await;
        ticker.disarm();
        assert_ne!(ticker.generation(), armed);
        assert!(!ticker.is_armed());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_schedule() {
        let first = Arc::new(AtomicU64::new(0));
        let second = Arc::new(AtomicU64::new(0));
        let mut ticker = Ticker::new();

        let old = ticker.arm(TICK_INTERVAL, counting(&first, u64::MAX));
        sleep(Duration::from_millis(1500)).await;
        let new = ticker.arm(TICK_INTERVAL, counting(&second, u64::MAX));
        assert!(new > old);

        sleep(Duration::from_millis(2200)).await;
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }
}
