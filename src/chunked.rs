// SPDX-License-Identifier: MIT

//! Static partitioning: the interior sample range is split up front into
//! one contiguous chunk per worker, with no shared state between workers.
//!
//! This is the fixed-schedule counterpart to the bag strategy and exists
//! mostly to compare against it. With a uniformly cheap integrand the two
//! land within a rounding error of each other; the bag pulls ahead when
//! sample costs are skewed.

use std::ops::Range;
use std::sync::Arc;
use std::thread;

use log::debug;

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::pool::reduce;

/// Splits an index range into at most `chunks` contiguous sub-ranges whose
/// lengths differ by at most one. The remainder spreads over the leading
/// chunks, and iteration stops once the range is used up, so no empty
/// chunk is ever produced.
pub struct ChunkSplitter {
    end: u64,
    next_start: u64,
    chunk: u64,
    chunks: u64,
    base_len: u64,
    extra: u64,
}

impl ChunkSplitter {
    pub fn new(range: Range<u64>, chunks: usize) -> Self {
        let total = range.end.saturating_sub(range.start);
        let chunks = chunks as u64;
        let (base_len, extra) = if chunks == 0 {
            (0, 0)
        } else {
            (total / chunks, total % chunks)
        };
        ChunkSplitter {
            end: range.end,
            next_start: range.start,
            chunk: 0,
            chunks,
            base_len,
            extra,
        }
    }
}

impl Iterator for ChunkSplitter {
    type Item = Range<u64>;

    fn next(&mut self) -> Option<Range<u64>> {
        if self.chunk >= self.chunks || self.next_start >= self.end {
            return None;
        }
        // The first `extra` chunks absorb the remainder, one index each.
        let len = self.base_len + (self.chunk < self.extra) as u64;
        let start = self.next_start;
        self.next_start = start + len;
        self.chunk += 1;
        Some(start..self.next_start)
    }
}

/// Estimates the integral of `f` over `[a, b]` with a fixed schedule: each
/// worker receives one pre-cut chunk of the interior samples and never
/// coordinates with the others.
///
/// The splitter stops handing out chunks once the samples run out, so
/// asking for more workers than there are interior samples spawns only as
/// many threads as can do work. A panic inside `f` on a worker thread
/// surfaces as [`Error::Evaluation`] without a sample index; unlike the
/// bag strategy there is no shared channel to report one through.
pub fn integrate_chunked<F>(
    f: F,
    a: f64,
    b: f64,
    intervals: u64,
    workers: usize,
) -> Result<f64>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    let domain = Interval::new(a, b, intervals)?;
    if workers == 0 {
        return Err(Error::TooFewWorkers { got: workers });
    }

    let step = domain.step();
    let boundary = domain.boundary_term(&f);
    let f = Arc::new(f);

    let mut handles: Vec<thread::JoinHandle<f64>> = Vec::with_capacity(workers);
    for (id, chunk) in ChunkSplitter::new(domain.interior(), workers).enumerate() {
        let f = Arc::clone(&f);
        let spawned = thread::Builder::new()
            .name(format!("taskbag-chunk-{id}"))
            .spawn(move || chunk.map(|index| f(a + index as f64 * step)).sum::<f64>());
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(spawn_error) => {
                // Started workers finish their own chunks; wait for them
                // before surfacing the failure.
                for started in handles {
                    let _ = started.join();
                }
                return Err(Error::Spawn(spawn_error));
            }
        }
    }
    debug!(
        "chunked run over {intervals} intervals with {count} workers",
        count = handles.len()
    );

    let mut partials = Vec::with_capacity(handles.len());
    let mut failed = false;
    for handle in handles {
        match handle.join() {
            Ok(partial) => partials.push(partial),
            Err(_) => failed = true,
        }
    }
    if failed {
        return Err(Error::Evaluation { index: None });
    }

    Ok(reduce(boundary, &partials, step))
}
