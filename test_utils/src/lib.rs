// SPDX-License-Identifier: MIT

//! Shared helpers for the taskbag tests, benchmarks and demos.

pub mod integrands;
pub mod sources;
