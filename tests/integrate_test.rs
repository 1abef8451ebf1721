// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU32, Ordering::SeqCst};
use std::sync::Arc;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use taskbag::{
    integrate, integrate_chunked, integrate_sequential, integrate_with, Error,
};
use test_utils::integrands::{square, square_integral, wobble};

#[test]
fn test_correctness_square_closed_form() {
    let estimate = integrate_with(square, 0.0, 2.0, 100_000, 8).unwrap();
    assert_relative_eq!(estimate, square_integral(0.0, 2.0), max_relative = 1e-8);
}

#[test]
fn test_correctness_sine_lobe() {
    let estimate = integrate(|x| x.sin(), 0.0, std::f64::consts::PI, 50_000).unwrap();
    assert_abs_diff_eq!(estimate, 2.0, epsilon = 1e-8);
}

#[test]
fn test_worker_count_does_not_change_the_estimate() {
    let reference = integrate_sequential(wobble, -2.0, 2.0, 100_000).unwrap();

    for workers in [1, 2, 3, 8, 16, 64] {
        let estimate = integrate_with(wobble, -2.0, 2.0, 100_000, workers).unwrap();
        assert_relative_eq!(estimate, reference, epsilon = 1e-10, max_relative = 1e-9);
    }
}

#[test]
fn test_chunked_and_bag_strategies_agree() {
    let bag = integrate_with(wobble, 0.0, 3.0, 10_000, 4).unwrap();
    let chunked = integrate_chunked(wobble, 0.0, 3.0, 10_000, 4).unwrap();
    assert_relative_eq!(bag, chunked, epsilon = 1e-10, max_relative = 1e-9);
}

#[test]
fn test_every_sample_is_evaluated_exactly_once() {
    let intervals = 5_000u64;
    let step = 1.0 / intervals as f64;
    // One counter per sample position, boundaries included.
    let hits: Arc<Vec<AtomicU32>> =
        Arc::new((0..=intervals).map(|_| AtomicU32::new(0)).collect());

    let recorder = Arc::clone(&hits);
    integrate_with(
        move |x: f64| {
            let index = (x / step).round() as usize;
            recorder[index].fetch_add(1, SeqCst);
            1.0
        },
        0.0,
        1.0,
        intervals,
        8,
    )
    .unwrap();

    for (index, hit) in hits.iter().enumerate() {
        assert_eq!(hit.load(SeqCst), 1, "sample {index} evaluated a wrong number of times");
    }
}

#[test]
fn test_constant_integrand_is_exact() {
    // Half-weighted boundaries make the rule exact for a constant at any
    // interval count.
    let estimate = integrate_with(|_x| 1.0, 2.0, 5.0, 777, 3).unwrap();
    assert_relative_eq!(estimate, 3.0, epsilon = 1e-12);
}

#[test]
fn test_single_interval_is_the_plain_trapezoid() {
    let estimate = integrate_with(square, 0.0, 2.0, 1, 4).unwrap();
    assert_abs_diff_eq!(estimate, 4.0);
}

#[test]
fn test_more_workers_than_samples() {
    let estimate = integrate_with(square, 0.0, 1.0, 4, 16).unwrap();
    let reference = integrate_sequential(square, 0.0, 1.0, 4).unwrap();
    assert_relative_eq!(estimate, reference, epsilon = 1e-12);
}

#[test]
fn test_identical_bounds_integrate_to_zero() {
    let estimate = integrate_with(square, 1.5, 1.5, 100, 4).unwrap();
    assert_eq!(estimate, 0.0);
}

#[test]
fn test_reversed_bounds_negate_the_estimate() {
    let forward = integrate_with(square, 0.0, 1.0, 10_000, 4).unwrap();
    let backward = integrate_with(square, 1.0, 0.0, 10_000, 4).unwrap();
    assert_relative_eq!(backward, -forward, epsilon = 1e-10, max_relative = 1e-9);
}

#[test]
fn test_zero_intervals_is_a_configuration_error() {
    match integrate_with(square, 0.0, 1.0, 0, 4) {
        Err(Error::TooFewIntervals { got: 0 }) => {}
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn test_error_messages_name_the_bad_parameter() {
    let err = integrate_with(square, 0.0, 1.0, 0, 4).unwrap_err();
    assert_eq!(err.to_string(), "need at least 1 interval, got 0");

    let err = integrate_with(square, 0.0, 1.0, 10, 0).unwrap_err();
    assert_eq!(err.to_string(), "need at least 1 worker, got 0");
}

#[test]
fn test_panicking_integrand_cancels_and_reports() {
    let estimate = integrate_with(
        |x: f64| {
            if x > 0.25 && x < 0.75 {
                panic!("spike");
            }
            x
        },
        0.0,
        1.0,
        1_000,
        4,
    );

    match estimate {
        Err(Error::Evaluation { index: Some(index) }) => {
            // With step 1e-3 the panicking window covers samples 251..=749.
            assert!(index > 250 && index < 750, "reported sample {index}");
        }
        other => panic!("expected an evaluation failure, got {other:?}"),
    }
}
