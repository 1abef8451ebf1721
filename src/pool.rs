// SPDX-License-Identifier: MIT

//! Fixed pool of worker threads draining a shared source, plus the final
//! reduction.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, trace, warn};

use crate::bag::WorkSource;
use crate::error::{Error, Result};

/// Sentinel value for "no failure recorded".
const NO_FAILURE: u64 = u64::MAX;

/// Shared cancellation state of one pool run.
///
/// Tripping the token records the first failing sample index and makes
/// every worker stop taking new work at its next loop check. Indices not
/// yet taken stay in the source and are abandoned; nothing is re-queued,
/// so the taken indices remain delivered exactly once.
struct CancelToken {
    tripped: AtomicBool,
    /// Sample index recorded by the first failing worker; `NO_FAILURE`
    /// until then. Relaxed accesses suffice: `join_all` reads this only
    /// after joining, and joining a thread synchronizes with everything it
    /// wrote.
    failed_index: AtomicU64,
}

impl CancelToken {
    fn new() -> Self {
        CancelToken {
            tripped: AtomicBool::new(false),
            failed_index: AtomicU64::new(NO_FAILURE),
        }
    }

    /// Stops the pool without recording a failure.
    fn cancel(&self) {
        self.tripped.store(true, Ordering::Release);
    }

    /// Stops the pool and records the failing sample, keeping the first
    /// one when several workers fail.
    fn trip(&self, index: u64) {
        if self
            .failed_index
            .compare_exchange(NO_FAILURE, index, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            warn!("integrand panicked at sample {index}; canceling remaining work");
        }
        self.tripped.store(true, Ordering::Release);
    }

    fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    /// The recorded failing sample, read after the workers are joined.
    fn failed_index(&self) -> Option<u64> {
        match self.failed_index.load(Ordering::Relaxed) {
            NO_FAILURE => None,
            index => Some(index),
        }
    }
}

/// Marks the sample a worker is currently evaluating so the token can
/// report it if the integrand unwinds. `disarm` is unreachable on a panic,
/// which is what routes the drop into `trip`.
struct EvalSentinel<'a> {
    token: &'a CancelToken,
    index: Cell<u64>,
    armed: Cell<bool>,
}

impl<'a> EvalSentinel<'a> {
    fn new(token: &'a CancelToken) -> Self {
        EvalSentinel {
            token,
            index: Cell::new(NO_FAILURE),
            armed: Cell::new(false),
        }
    }

    fn watch(&self, index: u64) {
        self.index.set(index);
        self.armed.set(true);
    }

    fn disarm(&self) {
        self.armed.set(false);
    }
}

impl Drop for EvalSentinel<'_> {
    fn drop(&mut self) {
        if self.armed.get() {
            self.token.trip(self.index.get());
        }
    }
}

/// Fixed set of worker threads draining one shared [`WorkSource`].
///
/// Each worker owns a private `f64` accumulator and loops: check the
/// cancel flag, take an index, add `f(a + index * step)`. A drained source
/// ends the worker, which yields its partial sum through its join handle.
pub struct WorkerPool {
    workers: Vec<thread::JoinHandle<f64>>,
    token: Arc<CancelToken>,
}

impl WorkerPool {
    /// Starts `workers` threads draining `source`.
    ///
    /// Fails with [`Error::TooFewWorkers`] before any thread starts when
    /// `workers` is zero, and with [`Error::Spawn`] when the operating
    /// system refuses a thread — in that case the workers already started
    /// are canceled and joined before the error is returned.
    pub fn spawn<S, F>(
        workers: usize,
        source: Arc<S>,
        f: Arc<F>,
        a: f64,
        step: f64,
    ) -> Result<WorkerPool>
    where
        S: WorkSource + 'static,
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        if workers == 0 {
            return Err(Error::TooFewWorkers { got: workers });
        }

        let mut pool = WorkerPool {
            workers: Vec::with_capacity(workers),
            token: Arc::new(CancelToken::new()),
        };

        for id in 0..workers {
            let source = Arc::clone(&source);
            let f = Arc::clone(&f);
            let token = Arc::clone(&pool.token);
            let handle = thread::Builder::new()
                .name(format!("taskbag-worker-{id}"))
                .spawn(move || {
                    let mut partial = 0.0;
                    let mut drained = 0u64;
                    let sentinel = EvalSentinel::new(&token);
                    loop {
                        // A tripped token leaves the untaken indices in the
                        // source; they are abandoned, never re-delivered.
                        if token.is_tripped() {
                            break;
                        }
                        let Some(index) = source.try_take() else {
                            break;
                        };
                        sentinel.watch(index);
                        partial += f(a + index as f64 * step);
                        sentinel.disarm();
                        drained += 1;
                    }
                    trace!("worker {id} drained {drained} samples");
                    partial
                });

            match handle {
                Ok(handle) => pool.workers.push(handle),
                Err(spawn_error) => {
                    // The pool cannot reach its configured size: stop the
                    // workers that did start and surface the failure.
                    pool.token.cancel();
                    for started in pool.workers.drain(..) {
                        let _ = started.join();
                    }
                    return Err(Error::Spawn(spawn_error));
                }
            }
        }

        debug!("spawned {workers} workers");
        Ok(pool)
    }

    /// Blocks until every worker has terminated, then returns their partial
    /// sums, one per worker, in unspecified order.
    ///
    /// A worker that panicked in the integrand is reported as
    /// [`Error::Evaluation`] after all remaining workers have stopped; no
    /// partial integral escapes a failed run.
    pub fn join_all(mut self) -> Result<Vec<f64>> {
        let mut partials = Vec::with_capacity(self.workers.len());
        let mut panicked = false;
        for handle in self.workers.drain(..) {
            match handle.join() {
                Ok(partial) => partials.push(partial),
                Err(_) => panicked = true,
            }
        }

        if panicked {
            return Err(Error::Evaluation {
                index: self.token.failed_index(),
            });
        }
        Ok(partials)
    }
}

impl Drop for WorkerPool {
    /// Cancels and joins any workers still attached, so dropping an
    /// unjoined pool cannot leak running threads. Their partial sums are
    /// discarded.
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.token.cancel();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Folds the boundary term and the per-worker partial sums into the final
/// trapezoid estimate, `(boundary + Σ partials) * step`.
///
/// Addition order over the partials is unspecified; callers comparing
/// results must use a floating-point tolerance.
pub fn reduce(boundary_term: f64, partial_sums: &[f64], step: f64) -> f64 {
    let total: f64 = boundary_term + partial_sums.iter().sum::<f64>();
    total * step
}
