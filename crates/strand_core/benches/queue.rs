// Benchmarks for the work-stealing job queue

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::thread;
use strand_core::jobs::{Steal, Worker};

// Owner-only fast path: no stealer ever touches the queue.
fn bench_push_pop(c: &mut Criterion) {
    let worker = Worker::<u64, 256>::new();
    c.bench_function("owner_push_pop_256", |b| {
        b.iter(|| {
            for i in 0..256u64 {
                worker.push(black_box(i)).unwrap();
            }
            while let Some(item) = worker.pop() {
                black_box(item);
            }
        })
    });
}

fn bench_push_steal(c: &mut Criterion) {
    let worker = Worker::<u64, 256>::new();
    let stealer = worker.stealer();
    c.bench_function("push_then_steal_256", |b| {
        b.iter(|| {
            for i in 0..256u64 {
                worker.push(black_box(i)).unwrap();
            }
            while let Steal::Success(item) = stealer.steal() {
                black_box(item);
            }
        })
    });
}

// Owner pops while two thieves drain the same queue.
fn bench_contended_drain(c: &mut Criterion) {
    c.bench_function("contended_drain_1024", |b| {
        b.iter(|| {
            let worker = Worker::<u64, 1024>::new();
            for i in 0..1024u64 {
                worker.push(i).unwrap();
            }
            thread::scope(|scope| {
                for _ in 0..2 {
                    let stealer = worker.stealer();
                    scope.spawn(move || loop {
                        match stealer.steal() {
                            Steal::Success(item) => {
                                black_box(item);
                            }
                            Steal::Retry => continue,
                            Steal::Empty => break,
                        }
                    });
                }
                while !worker.is_empty() {
                    black_box(worker.pop());
                }
            });
        })
    });
}

criterion_group!(benches, bench_push_pop, bench_push_steal, bench_contended_drain);
criterion_main!(benches);
