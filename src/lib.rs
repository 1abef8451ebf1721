// SPDX-License-Identifier: MIT

//! Parallel trapezoidal integration over a shared bag of sample indices.
//!
//! The interior samples of a composite trapezoid rule are independent work
//! units. [`integrate_with`] hands them out through an atomic cursor (the
//! [`IndexBag`]) to a fixed pool of worker threads; every worker keeps a
//! private partial sum, and [`reduce`] folds those into the final estimate
//! together with the half-weighted boundary term.
//!
//! ```
//! let estimate = taskbag::integrate_with(|x| x * x, 0.0, 1.0, 1_000, 8)?;
//! assert!((estimate - 1.0 / 3.0).abs() < 1e-4);
//! # Ok::<(), taskbag::Error>(())
//! ```
//!
//! [`integrate`] does the same with one worker per hardware thread, and
//! [`integrate_chunked`] trades the shared bag for one private contiguous
//! chunk of samples per worker. [`integrate_sequential`] is the
//! single-threaded baseline.

pub mod bag;
pub mod chunked;
pub mod error;
pub mod integrate;
pub mod interval;
pub mod pool;

pub use bag::{IndexBag, WorkSource};
pub use chunked::{integrate_chunked, ChunkSplitter};
pub use error::{Error, Result};
pub use integrate::{default_worker_count, integrate, integrate_sequential, integrate_with};
pub use interval::Interval;
pub use pool::{reduce, WorkerPool};
