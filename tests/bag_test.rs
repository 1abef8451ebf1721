// SPDX-License-Identifier: MIT

use std::sync::Arc;

use taskbag::WorkerPool;
use test_utils::sources::{RecordingSource, SlowSource};

#[test]
fn test_pool_delivers_each_index_exactly_once() {
    let source = Arc::new(RecordingSource::new(1..20_000));
    let pool =
        WorkerPool::spawn(8, Arc::clone(&source), Arc::new(|_x: f64| 0.0), 0.0, 1.0)
            .unwrap();
    pool.join_all().unwrap();

    assert_eq!(source.taken_sorted(), (1..20_000).collect::<Vec<u64>>());
}

#[test]
fn test_each_worker_stops_at_its_first_empty_take() {
    let workers = 4;
    let source = Arc::new(SlowSource::new(1..100, 50));
    let pool = WorkerPool::spawn(
        workers,
        Arc::clone(&source),
        Arc::new(|_x: f64| 0.0),
        0.0,
        1.0,
    )
    .unwrap();
    pool.join_all().unwrap();

    // 99 delivered indices plus exactly one empty take per worker.
    assert_eq!(source.takes(), 99 + workers as u64);
}

#[test]
fn test_no_double_counting_under_contention() {
    // Samples land on their index, so the partials summing to 1+2+..+100
    // proves nothing was skipped or delivered twice. The slowed takes
    // widen the race window; integer sums this small are exact in f64.
    for _ in 0..1_000 {
        let source = Arc::new(SlowSource::new(1..101, 20));
        let pool =
            WorkerPool::spawn(4, Arc::clone(&source), Arc::new(|x: f64| x), 0.0, 1.0)
                .unwrap();
        let partials = pool.join_all().unwrap();

        assert_eq!(partials.iter().sum::<f64>(), 5050.0);
    }
}

#[test]
fn test_cancellation_stops_delivery_early() {
    // Samples land on their index; everything from 10 on panics, so each
    // worker dies within its first few takes and the bag is abandoned.
    let source = Arc::new(RecordingSource::new(1..1_000_000));
    let f = Arc::new(|x: f64| {
        if x >= 10.0 {
            panic!("stop");
        }
        x
    });
    let pool = WorkerPool::spawn(2, Arc::clone(&source), f, 0.0, 1.0).unwrap();

    assert!(pool.join_all().is_err());
    assert!(source.taken_sorted().len() < 1_000);
}
