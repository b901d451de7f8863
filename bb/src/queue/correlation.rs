//! Plain FIFO correlation queue

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use uuid::Uuid;

/// Ordered identifiers pairing the Nth callback with the Nth request
///
/// Unlike [`SerialTaskQueue`](super::SerialTaskQueue) this enforces no mutual
/// exclusion: requests against different sub-resources may be outstanding at
/// once, and the driver's own per-sub-resource serialization keeps the pairing
/// valid. Dequeuing more often than was enqueued returns `None`; the caller
/// drops such callbacks silently.
#[derive(Default)]
pub struct CorrelationQueue {
    inner: Mutex<VecDeque<Uuid>>,
}

impl CorrelationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, id: Uuid) {
        debug!(%id, "CorrelationQueue::enqueue");
        self.lock().push_back(id);
    }

    pub fn dequeue(&self) -> Option<Uuid> {
        let id = self.lock().pop_front();
        match id {
            Some(id) => debug!(%id, "CorrelationQueue::dequeue"),
            None => debug!("CorrelationQueue::dequeue: queue empty"),
        }
        id
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Uuid>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
