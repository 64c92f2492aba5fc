use std::fmt;
use thiserror::Error;

/// A push that would have exceeded the queue's fixed capacity.
///
/// Carries the rejected item so the caller can run it inline or hand it to
/// another queue.
#[derive(Error)]
#[error("work-steal queue is full ({capacity} slots)")]
pub struct QueueFull<T> {
    item: T,
    capacity: usize,
}

impl<T> QueueFull<T> {
    pub(crate) fn new(item: T, capacity: usize) -> Self {
        Self { item, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn into_inner(self) -> T {
        self.item
    }
}

// Manual impl so `T` does not have to be `Debug`.
impl<T> fmt::Debug for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueFull")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
