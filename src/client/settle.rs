//! Write-once completion cell shared by a timer and an event listener.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

use crate::client::page::{LoadEvent, LoadListener};

/// Sending half of a one-shot result that accepts only the first value.
///
/// Clones share the same cell, so a timeout task and a DOM listener can
/// race to settle it; every call after the first is ignored.
#[derive(Debug)]
pub struct Settlement<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Settlement<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Settlement<T> {
    pub fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let settlement = Self {
            slot: Arc::new(Mutex::new(Some(tx))),
        };
        (settlement, rx)
    }

    /// Stores `value` if nothing was stored yet. Returns whether it won.
    pub fn settle(&self, value: T) -> bool {
        let sender = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            Some(tx) => {
                // A dropped receiver still counts as settled
                let _ = tx.send(value);
                true
            }
            None => false,
        }
    }
}

/// How a watched node settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Event(LoadEvent),
    TimedOut,
}

/// Starts a node with a listener and waits for its first event or `timeout`.
///
/// `start` receives the listener to hand to the page and returns whatever
/// the page returned (usually the node id). The timer task is aborted as
/// soon as the node settles; events arriving later are dropped.
pub async fn watch<R>(timeout: Duration, start: impl FnOnce(LoadListener) -> R) -> (R, Watch) {
    let (settlement, rx) = Settlement::channel();

    let on_event = settlement.clone();
    let listener: LoadListener = Box::new(move |event| {
        on_event.settle(Watch::Event(event));
    });

    let on_timeout = settlement.clone();
    let timer = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        on_timeout.settle(Watch::TimedOut);
    });

    let started = start(listener);
    let outcome = rx.await.unwrap_or(Watch::TimedOut);
    timer.abort();

    (started, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_settle_wins() {
        let (settlement, rx) = Settlement::channel();
        let other = settlement.clone();

        assert!(settlement.settle(1));
        assert!(!other.settle(2));
        assert!(!settlement.settle(3));
        assert_eq!(rx.await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_event_before_timeout() {
        let (_, outcome) = watch(Duration::from_secs(7), |listener| {
            listener(LoadEvent::Load);
        })
        .await;

        assert_eq!(outcome, Watch::Event(LoadEvent::Load));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_times_out_and_ignores_late_event() {
        let mut held = None;
        let started = tokio::time::Instant::now();

        let (_, outcome) = watch(Duration::from_secs(3), |listener| {
            held = Some(listener);
        })
        .await;

        assert_eq!(outcome, Watch::TimedOut);
        assert!(started.elapsed() >= Duration::from_secs(3));

        // Late event after settlement must be harmless
        if let Some(listener) = held {
            listener(LoadEvent::Error);
        }
    }
}
