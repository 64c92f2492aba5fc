//! Fixed-capacity lock-free work-stealing deque
//!
//! One owner pushes and pops at the bottom (LIFO); any number of stealers
//! take from the top (FIFO). Live items occupy the logical range
//! `[top, bottom)`, and logical index `i` maps to slot `i & (N - 1)`.

use super::Steal;
use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicIsize, Ordering};

/// Raw work-stealing deque with `N` slots.
///
/// `push` and `pop` are `unsafe`: the queue does not know which thread owns
/// it. Use [`Worker`](super::Worker) and [`Stealer`](super::Stealer) for a
/// safe split of the two roles.
///
/// `N` must be a power of two, which is checked when the queue is built:
///
/// ```compile_fail
/// use strand_core::jobs::WorkStealQueue;
///
/// let _queue = WorkStealQueue::<u32, 12>::new();
/// ```
pub struct WorkStealQueue<T, const N: usize> {
    /// Next logical index a stealer takes. Only advanced, always by CAS.
    top: CachePadded<AtomicIsize>,
    /// One past the owner's newest item. Only the owner stores to it.
    bottom: CachePadded<AtomicIsize>,
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// SAFETY: items move between threads through the queue, so `T: Send` is
// required. Slot access is serialized by the `top`/`bottom` protocol: the
// owner only writes outside `[top, bottom)`, and an item inside the range is
// handed out by exactly one successful `pop` or `steal`.
unsafe impl<T: Send, const N: usize> Send for WorkStealQueue<T, N> {}
unsafe impl<T: Send, const N: usize> Sync for WorkStealQueue<T, N> {}

impl<T, const N: usize> WorkStealQueue<T, N> {
    const CAPACITY_IS_POWER_OF_TWO: () = assert!(
        N.is_power_of_two() && N <= isize::MAX as usize,
        "work-steal queue capacity must be a power of two"
    );
    const MASK: isize = N.wrapping_sub(1) as isize;

    pub fn new() -> Self {
        let () = Self::CAPACITY_IS_POWER_OF_TWO;

        let slots = (0..N)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect();
        Self {
            top: CachePadded::new(AtomicIsize::new(0)),
            bottom: CachePadded::new(AtomicIsize::new(0)),
            slots,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn slot(&self, index: isize) -> *mut MaybeUninit<T> {
        self.slots[(index & Self::MASK) as usize].get()
    }

    /// Pushes `item` at the bottom.
    ///
    /// # Safety
    ///
    /// - Only the owning thread may call `push` or [`pop`](Self::pop), and
    ///   never concurrently with each other.
    /// - The queue must hold fewer than `N` items. Pushing into a full queue
    ///   overwrites a live slot.
    pub unsafe fn push(&self, item: T) {
        let bottom = self.bottom.load(Ordering::Relaxed);
        debug_assert!(
            bottom - self.top.load(Ordering::Relaxed) < N as isize,
            "work-steal queue overflow"
        );

        // SAFETY: `bottom` lies outside `[top, bottom)`; no pop or winning
        // steal reads this slot until the store below publishes it.
        self.slot(bottom).write(MaybeUninit::new(item));

        // Release pairs with the SeqCst loads of `bottom` in `steal`/`len`:
        // whoever sees the new bottom also sees the slot write.
        self.bottom.store(bottom + 1, Ordering::Release);
    }

    /// Pops the newest item from the bottom.
    ///
    /// Returns `None` when the queue is empty or a stealer won the race for
    /// the last item.
    ///
    /// # Safety
    ///
    /// Only the owning thread may call [`push`](Self::push) or `pop`, and
    /// never concurrently with each other.
    pub unsafe fn pop(&self) -> Option<T> {
        let bottom = self.bottom.fetch_sub(1, Ordering::SeqCst) - 1;
        let mut top = self.top.load(Ordering::SeqCst);

        if top < bottom {
            // At least one item stays behind, so no stealer can reach `bottom`.
            // SAFETY: `bottom` is in `[top, old bottom)` and was written by push.
            return Some(self.slot(bottom).read().assume_init());
        }

        let mut item = None;
        if top == bottom {
            match self
                .top
                .compare_exchange(top, top + 1, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => {
                    // SAFETY: winning the CAS takes the last item away from stealers.
                    item = Some(self.slot(bottom).read().assume_init());
                    top += 1;
                }
                Err(current) => top = current,
            }
        }

        // Empty either way: park both indices at the same point.
        self.bottom.store(top, Ordering::Relaxed);
        item
    }

    /// Steals the oldest item from the top.
    ///
    /// Makes a single attempt. `None` covers both an empty queue and a lost
    /// race; see [`try_steal`](Self::try_steal) to tell them apart.
    pub fn steal(&self) -> Option<T> {
        self.try_steal().success()
    }

    /// Single steal attempt reporting why it came back empty-handed.
    pub fn try_steal(&self) -> Steal<T> {
        let top = self.top.load(Ordering::SeqCst);
        let bottom = self.bottom.load(Ordering::SeqCst);
        if top >= bottom {
            return Steal::Empty;
        }

        // Speculative copy. It stays `MaybeUninit` until the CAS below proves
        // no one else owns the item; a losing copy is dropped as raw bits.
        // SAFETY: the slot index is masked into bounds.
        let item = unsafe { ptr::read_volatile(self.slot(top)) };

        match self
            .top
            .compare_exchange(top, top + 1, Ordering::SeqCst, Ordering::Relaxed)
        {
            // SAFETY: `top` was in `[top, bottom)` and the CAS made us its only reader.
            Ok(_) => Steal::Success(unsafe { item.assume_init() }),
            Err(_) => Steal::Retry,
        }
    }

    /// Advisory item count; may be stale as soon as it returns.
    pub fn len(&self) -> usize {
        let top = self.top.load(Ordering::SeqCst);
        let bottom = self.bottom.load(Ordering::SeqCst);
        (bottom - top).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item count as seen by the owner. Never under-reports, since `top`
    /// only grows after the load.
    #[inline]
    pub(crate) fn owner_len(&self) -> usize {
        let bottom = self.bottom.load(Ordering::Relaxed);
        let top = self.top.load(Ordering::Acquire);
        (bottom - top).max(0) as usize
    }
}

impl<T, const N: usize> Default for WorkStealQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for WorkStealQueue<T, N> {
    fn drop(&mut self) {
        let top = *self.top.get_mut();
        let bottom = *self.bottom.get_mut();
        for index in top..bottom {
            // SAFETY: `&mut self` excludes other threads and every index in
            // `[top, bottom)` holds an item nobody has taken.
            unsafe { (*self.slot(index)).assume_init_drop() };
        }
    }
}

impl<T, const N: usize> fmt::Debug for WorkStealQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkStealQueue")
            .field("top", &self.top.load(Ordering::Relaxed))
            .field("bottom", &self.bottom.load(Ordering::Relaxed))
            .field("capacity", &N)
            .finish()
    }
}
