//! Owner and stealer handles over a shared queue
//!
//! The raw [`WorkStealQueue`] trusts its caller to keep `push`/`pop` on one
//! thread. `Worker` makes that a type-level guarantee: it is `Send` but not
//! `Sync` or `Clone`, so exactly one thread holds the owner role at a time.

use super::{QueueFull, Steal, WorkStealQueue};
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use strand_metrics::QueueCounters;

struct Shared<T, const N: usize> {
    queue: WorkStealQueue<T, N>,
    counters: QueueCounters,
}

/// Owner side of a work-stealing queue: LIFO `push`/`pop` at the bottom.
pub struct Worker<T, const N: usize> {
    shared: Arc<Shared<T, N>>,
    /// Opts out of `Sync`; the owner role must not be shared by reference.
    _owner: PhantomData<Cell<()>>,
}

/// Thief side of a work-stealing queue: FIFO `steal` at the top.
pub struct Stealer<T, const N: usize> {
    shared: Arc<Shared<T, N>>,
}

impl<T, const N: usize> Worker<T, N> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: WorkStealQueue::new(),
                counters: QueueCounters::new(),
            }),
            _owner: PhantomData,
        }
    }

    /// New stealer handle for this queue.
    pub fn stealer(&self) -> Stealer<T, N> {
        Stealer {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Pushes `item`, or hands it back if all `N` slots are taken.
    pub fn push(&self, item: T) -> Result<(), QueueFull<T>> {
        let shared = &*self.shared;
        if shared.queue.owner_len() >= N {
            shared.counters.record_rejected();
            tracing::trace!(capacity = N, "work-steal queue full, push rejected");
            return Err(QueueFull::new(item, N));
        }

        // SAFETY: `Worker` is the only owner handle, it is `!Sync`, and the
        // check above keeps the queue below capacity.
        unsafe { shared.queue.push(item) };
        shared.counters.record_push();
        Ok(())
    }

    /// Pops the most recently pushed item.
    pub fn pop(&self) -> Option<T> {
        // SAFETY: see `push`.
        let item = unsafe { self.shared.queue.pop() };
        self.shared.counters.record_pop(item.is_some());
        item
    }

    pub fn len(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.queue.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Event counters shared with every stealer of this queue. No-op
    /// unless the `metrics` feature is enabled.
    pub fn counters(&self) -> &QueueCounters {
        &self.shared.counters
    }
}

impl<T, const N: usize> Default for Worker<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for Worker<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("queue", &self.shared.queue)
            .finish()
    }
}

impl<T, const N: usize> Stealer<T, N> {
    /// One steal attempt, never retried internally.
    pub fn steal(&self) -> Steal<T> {
        let steal = self.shared.queue.try_steal();
        let counters = &self.shared.counters;
        match steal {
            Steal::Success(_) => counters.record_steal(),
            Steal::Empty => counters.record_steal_empty(),
            Steal::Retry => counters.record_steal_retry(),
        }
        steal
    }

    pub fn len(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.queue.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn counters(&self) -> &QueueCounters {
        &self.shared.counters
    }
}

impl<T, const N: usize> Clone for Stealer<T, N> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, const N: usize> fmt::Debug for Stealer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stealer")
            .field("queue", &self.shared.queue)
            .finish()
    }
}
