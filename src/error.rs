// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors produced by an integration call.
#[derive(Debug, Error)]
pub enum Error {
    /// The domain must be split into at least one trapezoid.
    #[error("need at least 1 interval, got {got}")]
    TooFewIntervals {
        /// The rejected interval count.
        got: u64,
    },

    /// The pool must contain at least one worker.
    #[error("need at least 1 worker, got {got}")]
    TooFewWorkers {
        /// The rejected worker count.
        got: usize,
    },

    /// The integrand panicked while a worker was evaluating a sample.
    #[error("integrand panicked during sample evaluation")]
    Evaluation {
        /// The failing sample, when the worker recorded it before
        /// unwinding.
        index: Option<u64>,
    },

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
