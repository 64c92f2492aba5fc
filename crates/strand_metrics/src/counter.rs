//! Lock-free counters for work-steal queue events

use crate::CounterSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};

/// Event counters shared between a queue's owner and its stealers.
///
/// All updates are `Relaxed`: the counters only need to be eventually
/// consistent with each other, never ordered against queue operations.
#[derive(Debug, Default)]
pub struct QueueCounters {
    pushed: AtomicU64,
    rejected: AtomicU64,
    popped: AtomicU64,
    pop_empty: AtomicU64,
    stolen: AtomicU64,
    steal_empty: AtomicU64,
    steal_retry: AtomicU64,
}

impl QueueCounters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_push(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_pop(&self, hit: bool) {
        if hit {
            self.popped.fetch_add(1, Ordering::Relaxed);
        } else {
            self.pop_empty.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_steal(&self) {
        self.stolen.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_steal_empty(&self) {
        self.steal_empty.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_steal_retry(&self) {
        self.steal_retry.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            pushed: self.pushed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            popped: self.popped.load(Ordering::Relaxed),
            pop_empty: self.pop_empty.load(Ordering::Relaxed),
            stolen: self.stolen.load(Ordering::Relaxed),
            steal_empty: self.steal_empty.load(Ordering::Relaxed),
            steal_retry: self.steal_retry.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.pushed,
            &self.rejected,
            &self.popped,
            &self.pop_empty,
            &self.stolen,
            &self.steal_empty,
            &self.steal_retry,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
