// Multi-threaded behaviour of the work-stealing queue

use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;
use std::thread;
use strand_core::jobs::{Steal, Stealer, Worker};

/// Spins on lost races; returns `None` only once the queue is empty.
fn steal_until_settled<T, const N: usize>(stealer: &Stealer<T, N>) -> Option<T> {
    loop {
        match stealer.steal() {
            Steal::Success(item) => return Some(item),
            Steal::Empty => return None,
            Steal::Retry => std::hint::spin_loop(),
        }
    }
}

#[test]
fn three_stealers_then_owner_drains_in_reverse() {
    let worker = Worker::<u32, 8>::new();
    for item in 1..=5 {
        worker.push(item).unwrap();
    }

    let barrier = Barrier::new(3);
    let mut stolen: Vec<u32> = thread::scope(|scope| {
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let stealer = worker.stealer();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    steal_until_settled(&stealer).expect("queue still holds items")
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Steals come off the top, so the three oldest items are gone.
    stolen.sort_unstable();
    assert_eq!(stolen, vec![1, 2, 3]);

    assert_eq!(worker.len(), 2);
    assert_eq!(worker.pop(), Some(5));
    assert_eq!(worker.pop(), Some(4));
    assert_eq!(worker.pop(), None);
}

#[test]
fn every_item_is_delivered_exactly_once() {
    const TOTAL: u64 = 200_000;
    const STEALERS: usize = 4;

    let worker = Worker::<u64, 64>::new();
    let done = AtomicBool::new(false);

    let (owned, stolen) = thread::scope(|scope| {
        let thieves: Vec<_> = (0..STEALERS)
            .map(|_| {
                let stealer = worker.stealer();
                let done = &done;
                scope.spawn(move || {
                    let mut taken = Vec::new();
                    loop {
                        match stealer.steal() {
                            Steal::Success(item) => taken.push(item),
                            Steal::Retry => std::hint::spin_loop(),
                            Steal::Empty if done.load(Ordering::Acquire) => break,
                            Steal::Empty => thread::yield_now(),
                        }
                    }
                    taken
                })
            })
            .collect();

        let mut owned = Vec::new();
        for item in 0..TOTAL {
            let mut pending = item;
            // Make room by working through our own queue, like a real owner would.
            while let Err(full) = worker.push(pending) {
                pending = full.into_inner();
                owned.extend(worker.pop());
            }
            if item % 3 == 0 {
                owned.extend(worker.pop());
            }
        }
        while !worker.is_empty() {
            owned.extend(worker.pop());
        }
        done.store(true, Ordering::Release);

        let stolen: Vec<u64> = thieves
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        (owned, stolen)
    });

    let mut all: Vec<u64> = owned.iter().chain(stolen.iter()).copied().collect();
    all.sort_unstable();
    assert_eq!(all.len() as u64, TOTAL, "items lost or duplicated");
    assert!(all.iter().copied().eq(0..TOTAL), "delivered set differs from pushed set");
}

#[test]
fn last_item_race_has_one_winner() {
    const ROUNDS: usize = 20_000;

    let worker = Worker::<usize, 4>::new();
    let stealer = worker.stealer();
    let barrier = Barrier::new(2);

    thread::scope(|scope| {
        let thief = scope.spawn(|| {
            let mut wins = Vec::new();
            for round in 0..ROUNDS {
                barrier.wait();
                if let Steal::Success(item) = stealer.steal() {
                    assert_eq!(item, round);
                    wins.push(item);
                }
                barrier.wait();
            }
            wins
        });

        let mut owner_wins = 0usize;
        for round in 0..ROUNDS {
            worker.push(round).unwrap();
            barrier.wait();
            if let Some(item) = worker.pop() {
                assert_eq!(item, round);
                owner_wins += 1;
            }
            barrier.wait();
            // Exactly one side took it; nothing is left behind.
            assert!(worker.is_empty());
        }

        let thief_wins = thief.join().unwrap();
        assert_eq!(owner_wins + thief_wins.len(), ROUNDS);
    });
}

#[test]
fn stealers_drain_without_owner() {
    let worker = Worker::<u32, 1024>::new();
    for item in 0..1000 {
        worker.push(item).unwrap();
    }

    let mut stolen: Vec<u32> = thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let stealer = worker.stealer();
                scope.spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(item) = steal_until_settled(&stealer) {
                        taken.push(item);
                    }
                    taken
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    stolen.sort_unstable();
    assert_eq!(stolen, (0..1000).collect::<Vec<_>>());
    assert!(worker.is_empty());
}
