// SPDX-License-Identifier: MIT

use std::ops::Range;

use crate::error::{Error, Result};

/// Integration domain of one call: the bounds and the sample count.
///
/// Immutable once constructed. `new` is the single validation point for the
/// interval count, so every later stage can assume `intervals >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower bound of the domain.
    a: f64,
    /// Upper bound of the domain.
    b: f64,
    /// Number of trapezoids the domain is split into.
    intervals: u64,
}

impl Interval {
    /// Creates a validated domain over `[a, b]` split into `intervals`
    /// trapezoids.
    pub fn new(a: f64, b: f64, intervals: u64) -> Result<Self> {
        if intervals == 0 {
            return Err(Error::TooFewIntervals { got: intervals });
        }
        Ok(Interval { a, b, intervals })
    }

    /// Lower integration bound.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Upper integration bound.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Number of trapezoids.
    pub fn intervals(&self) -> u64 {
        self.intervals
    }

    /// Distance between consecutive sample points.
    pub fn step(&self) -> f64 {
        (self.b - self.a) / self.intervals as f64
    }

    /// The x-coordinate of sample `index`.
    pub fn sample(&self, index: u64) -> f64 {
        self.a + index as f64 * self.step()
    }

    /// Half-weighted contribution of the two endpoint samples.
    pub fn boundary_term<F>(&self, f: &F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        0.5 * (f(self.a) + f(self.b))
    }

    /// Indices of the interior samples, `1..intervals`. Empty for a single
    /// trapezoid, which degenerates to the boundary term alone.
    pub fn interior(&self) -> Range<u64> {
        1..self.intervals
    }
}
