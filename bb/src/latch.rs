//! Restoration latch
//!
//! The driver may replay restored session state before the application has
//! finished wiring its subscribers - a startup race that would silently drop
//! those events on a plain broadcast channel. The latch buffers restoration
//! payloads until the application signals readiness, then flushes them in
//! arrival order exactly once.

use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::domain::RestorationPayload;

#[derive(Default)]
struct LatchState {
    /// One-way flag; never reverts to false once set
    ready: bool,
    pending: Vec<RestorationPayload>,
}

/// Buffers restoration events until subscribers are ready
///
/// Owned by the central bridge; there is one latch per device manager, not
/// per connection, since restoration is a manager-wide driver event.
pub struct RestorationLatch {
    tx: broadcast::Sender<RestorationPayload>,
    state: Mutex<LatchState>,
}

impl RestorationLatch {
    pub(crate) fn new(tx: broadcast::Sender<RestorationPayload>) -> Self {
        Self {
            tx,
            state: Mutex::new(LatchState::default()),
        }
    }

    /// Handle a driver restoration event: publish if ready, buffer otherwise
    ///
    /// Publication happens under the latch lock so a racing event cannot
    /// overtake buffered ones mid-flush.
    pub fn on_restoration_event(&self, payload: RestorationPayload) {
        let mut state = self.lock();
        if state.ready {
            debug!("RestorationLatch: subscribers ready, publishing immediately");
            let _ = self.tx.send(payload);
        } else {
            info!(
                buffered = state.pending.len() + 1,
                "RestorationLatch: subscribers not ready, buffering event"
            );
            state.pending.push(payload);
        }
    }

    /// Mark subscribers ready and flush every buffered payload in FIFO order
    ///
    /// The buffer is emptied by the first call, so repeated calls flush
    /// nothing and re-publish nothing.
    pub fn mark_ready(&self) {
        let mut state = self.lock();
        info!("RestorationLatch: marking restoration subscribers ready");
        state.ready = true;

        let count = state.pending.len();
        for payload in state.pending.drain(..) {
            let mut keys: Vec<&str> = payload.keys().map(String::as_str).collect();
            keys.sort_unstable();
            debug!(?keys, "RestorationLatch: flushing buffered restoration event");
            let _ = self.tx.send(payload);
        }
        if count > 0 {
            info!(count, "RestorationLatch: flushed buffered restoration events");
        }
    }

    /// Whether readiness has been signaled
    pub fn is_ready(&self) -> bool {
        self.lock().ready
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(tag: &str) -> RestorationPayload {
        let mut map = RestorationPayload::new();
        map.insert("tag".to_string(), tag.into());
        map
    }

    fn latch_with_rx() -> (RestorationLatch, broadcast::Receiver<RestorationPayload>) {
        let (tx, rx) = broadcast::channel(16);
        (RestorationLatch::new(tx), rx)
    }

    #[tokio::test]
    async fn test_buffered_events_flush_in_order() {
        let (latch, mut rx) = latch_with_rx();

        latch.on_restoration_event(payload("r1"));
        latch.on_restoration_event(payload("r2"));
        assert!(rx.try_recv().is_err());

        latch.mark_ready();

        assert_eq!(rx.recv().await.unwrap()["tag"], "r1");
        assert_eq!(rx.recv().await.unwrap()["tag"], "r2");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_passthrough_after_ready() {
        let (latch, mut rx) = latch_with_rx();

        latch.mark_ready();
        latch.on_restoration_event(payload("r3"));

        assert_eq!(rx.recv().await.unwrap()["tag"], "r3");
    }

    #[tokio::test]
    async fn test_mark_ready_twice_does_not_republish() {
        let (latch, mut rx) = latch_with_rx();

        latch.on_restoration_event(payload("r1"));
        latch.mark_ready();
        assert_eq!(rx.recv().await.unwrap()["tag"], "r1");

        latch.mark_ready();
        assert!(rx.try_recv().is_err());
        assert!(latch.is_ready());
    }

    #[tokio::test]
    async fn test_buffer_then_passthrough_sequence() {
        let (latch, mut rx) = latch_with_rx();

        latch.on_restoration_event(payload("r1"));
        latch.on_restoration_event(payload("r2"));
        latch.mark_ready();
        latch.on_restoration_event(payload("r3"));

        // Exactly once each, original order, then the direct event
        assert_eq!(rx.recv().await.unwrap()["tag"], "r1");
        assert_eq!(rx.recv().await.unwrap()["tag"], "r2");
        assert_eq!(rx.recv().await.unwrap()["tag"], "r3");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_not_ready_by_default() {
        let (latch, _rx) = latch_with_rx();
        assert!(!latch.is_ready());
    }
}
