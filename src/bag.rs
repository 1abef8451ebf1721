// SPDX-License-Identifier: MIT

//! Shared bag of sample indices with exactly-once hand-out.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::interval::Interval;

/// Source of discrete work indices shared by all workers of one pool.
///
/// Implementations must hand out each index to exactly one caller — never
/// zero, never two — and must not block: a drained source answers `None`
/// immediately, forever.
pub trait WorkSource: Send + Sync {
    /// Removes and returns the next index, or `None` once the source is
    /// exhausted.
    fn try_take(&self) -> Option<u64>;
}

/// Index range drained through an atomic cursor.
///
/// The bag is the queue `start..end` without materializing it: the cursor
/// names the front element and `fetch_add` pops it. The pop is a single
/// atomic read-modify-write, so no two callers can observe the same front
/// index, and the emptiness check costs nothing extra.
pub struct IndexBag {
    /// Next index to hand out; values at or beyond `end` mean empty.
    cursor: AtomicU64,
    /// One past the last index in the bag.
    end: u64,
}

impl IndexBag {
    /// Creates a bag holding every index of `range` in ascending order.
    pub fn new(range: Range<u64>) -> Self {
        IndexBag {
            cursor: AtomicU64::new(range.start),
            end: range.end,
        }
    }

    /// Creates a bag of the interior sample indices of `domain`,
    /// `1..intervals`. Empty for a single trapezoid.
    pub fn interior(domain: &Interval) -> Self {
        IndexBag::new(domain.interior())
    }

    /// Number of indices not yet handed out. Racy under concurrent takes;
    /// meant for logging and tests, not for emptiness decisions.
    pub fn remaining(&self) -> u64 {
        self.end - self.cursor.load(Ordering::Relaxed).min(self.end)
    }

    /// Whether every index has been handed out.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl WorkSource for IndexBag {
    fn try_take(&self) -> Option<u64> {
        // Relaxed is enough: uniqueness comes from the read-modify-write
        // itself, and the work done for an index stays thread-local until
        // the joining thread synchronizes with the worker.
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        (index < self.end).then_some(index)
    }
}
