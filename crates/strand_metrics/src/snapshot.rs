//! Counter snapshots, available with or without the `metrics` feature

/// Point-in-time copy of [`QueueCounters`](crate::QueueCounters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub pushed: u64,
    pub rejected: u64,
    pub popped: u64,
    pub pop_empty: u64,
    pub stolen: u64,
    pub steal_empty: u64,
    pub steal_retry: u64,
}

impl CounterSnapshot {
    /// Items that left the queue through either end.
    pub fn delivered(&self) -> u64 {
        self.popped + self.stolen
    }

    /// Fraction of steal attempts that came back with an item.
    pub fn steal_hit_ratio(&self) -> f64 {
        let attempts = self.stolen + self.steal_empty + self.steal_retry;
        if attempts == 0 {
            0.0
        } else {
            self.stolen as f64 / attempts as f64
        }
    }
}
