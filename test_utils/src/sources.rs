// SPDX-License-Identifier: MIT

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering::SeqCst};
use std::sync::Mutex;

use taskbag::{IndexBag, WorkSource};

/// Source that remembers every index it hands out, for checking
/// exactly-once delivery through a pool.
pub struct RecordingSource {
    inner: IndexBag,
    delivered: Mutex<Vec<u64>>,
}

impl RecordingSource {
    pub fn new(range: Range<u64>) -> Self {
        RecordingSource {
            inner: IndexBag::new(range),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Every delivered index, in ascending order.
    pub fn taken_sorted(&self) -> Vec<u64> {
        let mut taken = self.delivered.lock().unwrap().clone();
        taken.sort_unstable();
        taken
    }
}

impl WorkSource for RecordingSource {
    fn try_take(&self) -> Option<u64> {
        let index = self.inner.try_take()?;
        self.delivered.lock().unwrap().push(index);
        Some(index)
    }
}

/// Source that burns a fixed spin before every take, widening the window
/// for workers to interleave, and counts the takes it serves.
pub struct SlowSource {
    inner: IndexBag,
    spins: u32,
    takes: AtomicU64,
}

impl SlowSource {
    pub fn new(range: Range<u64>, spins: u32) -> Self {
        SlowSource {
            inner: IndexBag::new(range),
            spins,
            takes: AtomicU64::new(0),
        }
    }

    /// Number of takes served, counting the empty ones.
    pub fn takes(&self) -> u64 {
        self.takes.load(SeqCst)
    }
}

impl WorkSource for SlowSource {
    fn try_take(&self) -> Option<u64> {
        for _ in 0..self.spins {
            std::hint::spin_loop();
        }
        self.takes.fetch_add(1, SeqCst);
        self.inner.try_take()
    }
}
