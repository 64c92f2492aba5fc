//! One owner thread against a pool of stealers over a single queue

use crate::settings::{StressSettings, QUEUE_CAPACITY};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use strand_core::jobs::{Steal, Worker};
use strand_metrics::CounterSnapshot;

/// Everything a round handed out, by who took it.
#[derive(Debug)]
pub struct RoundReport {
    pub round: usize,
    pub owned: Vec<u64>,
    pub stolen: Vec<Vec<u64>>,
    pub counters: CounterSnapshot,
}

impl RoundReport {
    pub fn stolen_total(&self) -> usize {
        self.stolen.iter().map(Vec::len).sum()
    }
}

/// Pushes ids `0..items_per_round` through one queue while `stealers`
/// threads steal from it, then drains whatever is left as the owner.
pub fn run_round(settings: &StressSettings, round: usize) -> RoundReport {
    let worker = Worker::<u64, QUEUE_CAPACITY>::new();
    let done = AtomicBool::new(false);

    let (owned, stolen) = thread::scope(|scope| {
        let thieves: Vec<_> = (0..settings.stealers)
            .map(|index| {
                let stealer = worker.stealer();
                let done = &done;
                scope.spawn(move || {
                    let mut taken = Vec::new();
                    let mut retries = 0u64;
                    loop {
                        match stealer.steal() {
                            Steal::Success(item) => taken.push(item),
                            Steal::Retry => {
                                retries += 1;
                                std::hint::spin_loop();
                            }
                            Steal::Empty if done.load(Ordering::Acquire) => break,
                            Steal::Empty => thread::yield_now(),
                        }
                    }
                    tracing::debug!(round, stealer = index, taken = taken.len(), retries, "stealer finished");
                    taken
                })
            })
            .collect();

        let owned = drive_owner(&worker, settings);
        done.store(true, Ordering::Release);

        let stolen: Vec<Vec<u64>> = thieves
            .into_iter()
            .map(|thief| thief.join().unwrap_or_default())
            .collect();
        (owned, stolen)
    });

    RoundReport {
        round,
        owned,
        stolen,
        counters: worker.counters().snapshot(),
    }
}

fn drive_owner(worker: &Worker<u64, QUEUE_CAPACITY>, settings: &StressSettings) -> Vec<u64> {
    let mut owned = Vec::new();

    for item in 0..settings.items_per_round {
        let mut pending = item;
        while let Err(full) = worker.push(pending) {
            pending = full.into_inner();
            owned.extend(worker.pop());
        }
        if (item + 1) % settings.pop_every == 0 {
            owned.extend(worker.pop());
        }
    }

    while !worker.is_empty() {
        owned.extend(worker.pop());
    }
    tracing::debug!(owned = owned.len(), "owner drained queue");
    owned
}
