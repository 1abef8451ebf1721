// SPDX-License-Identifier: MIT

//! Top-level integration entry points tying the interval, the bag and the
//! pool together.

use std::sync::Arc;
use std::thread;

use log::debug;

use crate::bag::IndexBag;
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::pool::{reduce, WorkerPool};

/// Worker count used by [`integrate`]: the hardware parallelism reported
/// by the operating system, or 4 when that is unavailable.
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}

/// Estimates the integral of `f` over `[a, b]` with the trapezoid rule,
/// using [`default_worker_count`] workers.
///
/// ```
/// let area = taskbag::integrate(|x| x.sin(), 0.0, std::f64::consts::PI, 10_000)?;
/// assert!((area - 2.0).abs() < 1e-6);
/// # Ok::<(), taskbag::Error>(())
/// ```
pub fn integrate<F>(f: F, a: f64, b: f64, intervals: u64) -> Result<f64>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    integrate_with(f, a, b, intervals, default_worker_count())
}

/// Estimates the integral of `f` over `[a, b]` with the trapezoid rule and
/// an explicit worker count.
///
/// The interior samples go into an [`IndexBag`] drained by `workers`
/// threads; each thread accumulates a private partial sum and the partials
/// are reduced after the join. The worker count changes how the samples
/// are shared out, not which samples are taken, so the estimate is stable
/// across counts up to floating-point reassociation.
///
/// # Errors
///
/// Configuration is checked before `f` is evaluated or any thread starts:
/// zero `intervals` is [`Error::TooFewIntervals`], zero `workers` is
/// [`Error::TooFewWorkers`]. A panic inside `f` on a worker thread cancels
/// the run and surfaces as [`Error::Evaluation`] carrying the failing
/// sample index; a refused thread spawn surfaces as [`Error::Spawn`].
pub fn integrate_with<F>(f: F, a: f64, b: f64, intervals: u64, workers: usize) -> Result<f64>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    let domain = Interval::new(a, b, intervals)?;
    if workers == 0 {
        return Err(Error::TooFewWorkers { got: workers });
    }

    let step = domain.step();
    let boundary = domain.boundary_term(&f);
    let source = Arc::new(IndexBag::interior(&domain));
    debug!("bag run over {intervals} intervals with {workers} workers");

    let pool = WorkerPool::spawn(workers, source, Arc::new(f), domain.a(), step)?;
    let partials = pool.join_all()?;
    Ok(reduce(boundary, &partials, step))
}

/// Single-threaded trapezoid rule, the reference the parallel strategies
/// are checked against.
pub fn integrate_sequential<F>(f: F, a: f64, b: f64, intervals: u64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let domain = Interval::new(a, b, intervals)?;
    let mut sum = domain.boundary_term(&f);
    for index in domain.interior() {
        sum += f(domain.sample(index));
    }
    Ok(sum * domain.step())
}
