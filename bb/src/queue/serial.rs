//! Single-task operation queue

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use uuid::Uuid;

/// Deferred action that issues the actual driver request
type Continuation = Box<dyn FnOnce() + Send>;

struct PendingOperation {
    id: Uuid,
    /// Taken (set to `None`) once the operation has been started
    continuation: Option<Continuation>,
}

/// FIFO queue that keeps at most one operation's continuation running
///
/// An operation enqueued on an empty queue starts immediately; otherwise it
/// waits until every earlier operation has been dequeued and [`run_next`] has
/// released it. The callback handler drives the cycle: `dequeue()` retrieves
/// the completed operation's id, `run_next()` starts the new head.
///
/// Continuations are invoked outside the internal lock, so a continuation may
/// re-enter the queue (e.g. chain another discovery) without deadlocking.
///
/// There is no timeout: if the driver never calls back, the queue stalls.
/// Liveness is the caller's concern, not this type's.
///
/// [`run_next`]: SerialTaskQueue::run_next
#[derive(Default)]
pub struct SerialTaskQueue {
    inner: Mutex<VecDeque<PendingOperation>>,
}

impl SerialTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation; start it before returning if the queue was empty
    pub fn enqueue(&self, id: Uuid, continuation: impl FnOnce() + Send + 'static) {
        let boxed: Continuation = Box::new(continuation);
        let immediate = {
            let mut queue = self.lock();
            if queue.is_empty() {
                queue.push_back(PendingOperation {
                    id,
                    continuation: None,
                });
                Some(boxed)
            } else {
                debug!(%id, depth = queue.len(), "SerialTaskQueue::enqueue: waiting behind in-flight operation");
                queue.push_back(PendingOperation {
                    id,
                    continuation: Some(boxed),
                });
                None
            }
        };

        if let Some(run) = immediate {
            debug!(%id, "SerialTaskQueue::enqueue: queue was empty, starting operation");
            run();
        }
    }

    /// Remove and return the head operation's id; `None` on an empty queue
    pub fn dequeue(&self) -> Option<Uuid> {
        let op = self.lock().pop_front();
        match &op {
            Some(op) => debug!(id = %op.id, "SerialTaskQueue::dequeue"),
            None => debug!("SerialTaskQueue::dequeue: queue empty"),
        }
        op.map(|op| op.id)
    }

    /// Start the current head without removing it; no-op on an empty queue
    ///
    /// A head that has already been started is not started again, so calling
    /// this twice after one dequeue is harmless.
    pub fn run_next(&self) {
        let next = {
            let mut queue = self.lock();
            queue.front_mut().map(|op| (op.id, op.continuation.take()))
        };
        match next {
            Some((id, Some(run))) => {
                debug!(%id, "SerialTaskQueue::run_next: starting operation");
                run();
            }
            Some((id, None)) => debug!(%id, "SerialTaskQueue::run_next: head already started"),
            None => debug!("SerialTaskQueue::run_next: queue empty"),
        }
    }

    /// Number of operations currently queued (including the one in flight)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<PendingOperation>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use proptest::prelude::*;

    use super::*;

    fn recorder(log: &Arc<Mutex<Vec<Uuid>>>, id: Uuid) -> impl FnOnce() + Send + 'static {
        let log = Arc::clone(log);
        move || log.lock().unwrap().push(id)
    }

    #[test]
    fn test_enqueue_on_empty_runs_immediately() {
        let queue = SerialTaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let id = Uuid::new_v4();

        queue.enqueue(id, recorder(&log, id));

        assert_eq!(*log.lock().unwrap(), vec![id]);
        // The operation stays queued until its callback dequeues it
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_enqueue_on_busy_queue_defers() {
        let queue = SerialTaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        queue.enqueue(a, recorder(&log, a));
        queue.enqueue(b, recorder(&log, b));

        // Only A has run; B waits for A's callback
        assert_eq!(*log.lock().unwrap(), vec![a]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_abc_sequence() {
        let queue = SerialTaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        queue.enqueue(a, recorder(&log, a));
        queue.enqueue(b, recorder(&log, b));
        queue.enqueue(c, recorder(&log, c));
        assert_eq!(*log.lock().unwrap(), vec![a]);

        // A's callback arrives
        assert_eq!(queue.dequeue(), Some(a));
        queue.run_next();
        assert_eq!(*log.lock().unwrap(), vec![a, b]);

        // B's callback arrives
        assert_eq!(queue.dequeue(), Some(b));
        queue.run_next();
        assert_eq!(*log.lock().unwrap(), vec![a, b, c]);

        assert_eq!(queue.dequeue(), Some(c));
        queue.run_next();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_empty_is_safe() {
        let queue = SerialTaskQueue::new();
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_run_next_empty_is_safe() {
        let queue = SerialTaskQueue::new();
        queue.run_next();
    }

    #[test]
    fn test_run_next_does_not_rerun_started_head() {
        let queue = SerialTaskQueue::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        queue.enqueue(Uuid::new_v4(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        // Ran at enqueue time; a stray run_next must not run it again
        queue.run_next();
        queue.run_next();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reentrant_enqueue_from_continuation() {
        let queue = Arc::new(SerialTaskQueue::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let inner_queue = Arc::clone(&queue);
        let inner_log = Arc::clone(&log);
        queue.enqueue(a, move || {
            inner_log.lock().unwrap().push(a);
            // Chained discovery issued from inside the running operation
            inner_queue.enqueue(b, recorder(&inner_log, b));
        });

        // No deadlock; B is queued behind A and has not run yet
        assert_eq!(*log.lock().unwrap(), vec![a]);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.dequeue(), Some(a));
        queue.run_next();
        assert_eq!(*log.lock().unwrap(), vec![a, b]);
    }

    proptest! {
        /// Callbacks are matched to requests in strict FIFO order, with at
        /// most one continuation started per dequeue/run_next cycle.
        #[test]
        fn prop_fifo_order(n in 1usize..24) {
            let queue = SerialTaskQueue::new();
            let log = Arc::new(Mutex::new(Vec::new()));
            let ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();

            for &id in &ids {
                queue.enqueue(id, recorder(&log, id));
            }
            // Only the first operation has started
            prop_assert_eq!(log.lock().unwrap().len(), 1);

            for (i, &id) in ids.iter().enumerate() {
                prop_assert_eq!(queue.dequeue(), Some(id));
                queue.run_next();
                // Exactly one more continuation started, in request order
                let started = log.lock().unwrap().clone();
                let expected: Vec<Uuid> = ids.iter().take((i + 2).min(n)).copied().collect();
                prop_assert_eq!(started, expected);
            }
            prop_assert!(queue.is_empty());
        }
    }
}
