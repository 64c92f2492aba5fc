//! Wall-clock timing of stress rounds

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

pub struct RoundTimer {
    round_start: Instant,
    round_times: RingBuffer<Duration>,
}

impl RoundTimer {
    /// Track the last `window` rounds.
    pub fn new(window: usize) -> Self {
        Self {
            round_start: Instant::now(),
            round_times: RingBuffer::new(window),
        }
    }

    pub fn begin(&mut self) {
        self.round_start = Instant::now();
    }

    /// Close the current round and return its duration.
    pub fn end(&mut self) -> Duration {
        let elapsed = self.round_start.elapsed();
        self.round_times.push(elapsed);
        elapsed
    }

    pub fn rounds(&self) -> usize {
        self.round_times.len()
    }

    pub fn average_ms(&self) -> f64 {
        self.round_times.average().as_secs_f64() * 1000.0
    }

    pub fn range_ms(&self) -> (f64, f64) {
        let (min, max) = self.round_times.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }

    /// Items per second over the recorded window.
    pub fn throughput(&self, items_per_round: usize) -> f64 {
        let avg = self.round_times.average().as_secs_f64();
        if avg > 0.0 {
            items_per_round as f64 / avg
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_timer_records_rounds() {
        let mut timer = RoundTimer::new(4);
        assert_eq!(timer.throughput(100), 0.0);

        for _ in 0..6 {
            timer.begin();
            std::thread::sleep(Duration::from_millis(1));
            let elapsed = timer.end();
            assert!(elapsed >= Duration::from_millis(1));
        }

        assert_eq!(timer.rounds(), 4);
        let (min, max) = timer.range_ms();
        assert!(min >= 1.0 && max >= min);
        assert!(timer.average_ms() >= 1.0);
    }
}
