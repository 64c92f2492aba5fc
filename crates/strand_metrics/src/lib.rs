//! Strand Metrics - Instrumentation for work-steal queues
//!
//! Provides zero-cost abstractions for queue instrumentation that completely
//! vanish in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use strand_metrics::{QueueCounters, RoundTimer};
//!
//! let counters = QueueCounters::new();
//! let mut timer = RoundTimer::new(16); // Track last 16 rounds
//! timer.begin();
//! counters.record_push();
//! timer.end();
//! println!("delivered: {}", counters.snapshot().delivered());
//! ```
//!
//! In production builds (without `metrics` feature), all instrumentation
//! is compiled out to zero overhead.

mod snapshot;

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod round_timer;

pub use snapshot::CounterSnapshot;

#[cfg(feature = "metrics")]
pub use counter::QueueCounters;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use round_timer::RoundTimer;

/// Whether instrumentation was compiled in.
pub const ENABLED: bool = cfg!(feature = "metrics");

// ============================================================================
// Macros for conditional compilation
// ============================================================================

/// Execute code only when metrics are enabled
#[macro_export]
macro_rules! metrics {
    ($($tt:tt)*) => {
        #[cfg(feature = "metrics")]
        {
            $($tt)*
        }
    };
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct QueueCounters;

#[cfg(not(feature = "metrics"))]
impl QueueCounters {
    pub fn new() -> Self { Self }
    #[inline] pub fn record_push(&self) {}
    #[inline] pub fn record_rejected(&self) {}
    #[inline] pub fn record_pop(&self, _hit: bool) {}
    #[inline] pub fn record_steal(&self) {}
    #[inline] pub fn record_steal_empty(&self) {}
    #[inline] pub fn record_steal_retry(&self) {}
    pub fn snapshot(&self) -> CounterSnapshot { CounterSnapshot::default() }
    pub fn reset(&self) {}
}

#[cfg(not(feature = "metrics"))]
pub struct RingBuffer<T>(std::marker::PhantomData<T>);

#[cfg(not(feature = "metrics"))]
impl<T> RingBuffer<T> {
    pub fn new(_capacity: usize) -> Self { Self(std::marker::PhantomData) }
    pub fn push(&mut self, _value: T) {}
    pub fn len(&self) -> usize { 0 }
    pub fn is_empty(&self) -> bool { true }
}

#[cfg(not(feature = "metrics"))]
pub struct RoundTimer;

#[cfg(not(feature = "metrics"))]
impl RoundTimer {
    pub fn new(_window: usize) -> Self { Self }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) -> std::time::Duration { std::time::Duration::ZERO }
    pub fn rounds(&self) -> usize { 0 }
    pub fn average_ms(&self) -> f64 { 0.0 }
    pub fn range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
    pub fn throughput(&self, _items_per_round: usize) -> f64 { 0.0 }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_compiles_with_or_without_metrics() {
        let counters = super::QueueCounters::new();
        counters.record_push();
        counters.record_pop(true);

        let snap = counters.snapshot();
        if super::ENABLED {
            assert_eq!(snap.pushed, 1);
            assert_eq!(snap.delivered(), 1);
        } else {
            assert_eq!(snap, super::CounterSnapshot::default());
        }

        let _timer = super::RoundTimer::new(8);
        let _buffer = super::RingBuffer::<f64>::new(10);
    }
}
