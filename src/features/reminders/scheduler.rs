//! Concurrent expiration scheduler
//!
//! One tokio task per pending reminder, suspended on `sleep_until` until the
//! fire instant. Cancellation and firing race against each other by design
//! (a user can delete a reminder in the same instant it expires), so both
//! paths claim a per-reminder state transition under the same lock; whoever
//! claims first wins and the loser backs off. The completion callback
//! therefore runs exactly once or not at all.
//!
//! One task per reminder is fine at chat-bot cardinality. If this ever has
//! to handle very large reminder counts, the shape to move to is a single
//! dispatcher task over a min-heap of deadlines.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, info};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

use super::entity::ReminderId;
use super::error::ReminderError;

/// Lifecycle of one scheduled wait. Fired and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitState {
    Scheduled,
    Fired,
    Cancelled,
}

struct WaitHandle {
    state: Arc<Mutex<WaitState>>,
    cancel: oneshot::Sender<()>,
}

/// Owns the id -> wait map. Holds cancellable handles only; the store owns
/// entity state.
#[derive(Default)]
pub struct ReminderScheduler {
    waits: Arc<DashMap<ReminderId, WaitHandle>>,
}

fn lock_state(state: &Mutex<WaitState>) -> std::sync::MutexGuard<'_, WaitState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start one wait for `id` that invokes `on_fire` when wall-clock time
    /// reaches `fire_at`. An instant already in the past fires on the next
    /// scheduler tick rather than being dropped, which is what makes
    /// catch-up delivery after a restart work.
    pub fn schedule<F, Fut>(&self, id: ReminderId, fire_at: DateTime<Utc>, on_fire: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let state = Arc::new(Mutex::new(WaitState::Scheduled));
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        self.waits.insert(
            id,
            WaitHandle {
                state: state.clone(),
                cancel: cancel_tx,
            },
        );

        let waits = self.waits.clone();
        tokio::spawn(async move {
            let delay = (fire_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                // Sender dropped also means cancelled.
                _ = cancel_rx => {
                    debug!("wait for reminder {id} interrupted by cancel");
                    return;
                }
            }

            // Claim the transition before doing anything observable.
            {
                let mut st = lock_state(&state);
                if *st != WaitState::Scheduled {
                    debug!("reminder {id} reached its deadline but was already {:?}", *st);
                    return;
                }
                *st = WaitState::Fired;
            }
            waits.remove(&id);
            info!("reminder {id} fired");
            on_fire().await;
        });
    }

    /// Cancel a pending wait. After `Ok(())` the completion callback is
    /// guaranteed never to run. Returns `AlreadyTerminal` if the reminder
    /// fired first (or was never scheduled); callers absorb that silently.
    pub fn cancel(&self, id: ReminderId) -> Result<(), ReminderError> {
        let Some((_, handle)) = self.waits.remove(&id) else {
            return Err(ReminderError::AlreadyTerminal);
        };

        {
            let mut st = lock_state(&handle.state);
            if *st != WaitState::Scheduled {
                return Err(ReminderError::AlreadyTerminal);
            }
            *st = WaitState::Cancelled;
        }
        // The task may be past the sleep already; the state check above is
        // what actually stops it. The signal just wakes it early.
        let _ = handle.cancel.send(());
        debug!("reminder {id} cancelled");
        Ok(())
    }

    /// Number of waits that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.waits.len()
    }
}
