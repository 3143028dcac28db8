//! Replay-latest publish/subscribe channel for timer snapshots

use tokio::sync::{
    broadcast::{self, error::RecvError, error::TryRecvError},
    watch,
};
use tracing::{debug, warn};

use super::TimerState;

const UPDATE_CAPACITY: usize = 256;

/// Publisher side: keeps the latest snapshot and fans every update out to subscribers
#[derive(Debug)]
pub struct StateChannel {
    latest_tx: watch::Sender<TimerState>,
    update_tx: broadcast::Sender<TimerState>,
}

impl StateChannel {
    pub fn new(initial: TimerState) -> Self {
        let (latest_tx, _) = watch::channel(initial);
        let (update_tx, _) = broadcast::channel(UPDATE_CAPACITY);
        Self { latest_tx, update_tx }
    }

    /// Record `state` as the latest value and deliver it to every subscriber
    pub fn publish(&self, state: TimerState) {
        self.latest_tx.send_replace(state);
        if self.update_tx.send(state).is_err() {
            debug!("No subscribers for timer state update");
        }
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> TimerState {
        *self.latest_tx.borrow()
    }

    /// Subscribe, starting from the current value.
    ///
    /// Callers must not race this against `publish`, otherwise an update can
    /// be both replayed and delivered live.
    pub fn subscribe(&self) -> StateStream {
        StateStream {
            pending: Some(self.latest()),
            update_rx: self.update_tx.subscribe(),
        }
    }
}

/// Subscriber side: yields the snapshot current at subscription time, then every update in order
#[derive(Debug)]
pub struct StateStream {
    pending: Option<TimerState>,
    update_rx: broadcast::Receiver<TimerState>,
}

impl StateStream {
    /// Wait for the next snapshot; `None` once the publisher is gone
    pub async fn next(&mut self) -> Option<TimerState> {
        if let Some(state) = self.pending.take() {
            return Some(state);
        }

        loop {
            match self.update_rx.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("State subscriber lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next snapshot if one is already queued
    pub fn try_next(&mut self) -> Option<TimerState> {
        if let Some(state) = self.pending.take() {
            return Some(state);
        }

        loop {
            match self.update_rx.try_recv() {
                Ok(state) => return Some(state),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("State subscriber lagged, skipped {} updates", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
