//! Job queues for the worker pool.
//!
//! Each worker thread owns a fixed-capacity [`WorkStealQueue`]. The owner
//! pushes and pops its own jobs LIFO at the bottom, which keeps recently
//! spawned work hot in cache; idle workers steal FIFO from the top of other
//! workers' queues. Every operation is a single bounded attempt: nothing
//! blocks, spins, or retries internally, so retry policy belongs to the
//! scheduler.
//!
//! ```
//! use strand_core::jobs::{Steal, Worker};
//!
//! let worker = Worker::<u32, 8>::new();
//! let stealer = worker.stealer();
//!
//! worker.push(1).unwrap();
//! worker.push(2).unwrap();
//! worker.push(3).unwrap();
//!
//! let thief = std::thread::spawn(move || stealer.steal());
//! let stolen = thief.join().unwrap();
//! assert_eq!(stolen, Steal::Success(1));
//!
//! assert_eq!(worker.pop(), Some(3));
//! assert_eq!(worker.pop(), Some(2));
//! assert_eq!(worker.pop(), None);
//! ```

mod error;
mod handle;
mod queue;
mod steal;

pub use error::QueueFull;
pub use handle::{Stealer, Worker};
pub use queue::WorkStealQueue;
pub use steal::Steal;
