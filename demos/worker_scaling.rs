use std::time::Instant;

use taskbag::integrate_with;

/// Oscillating integrand, expensive enough to make the threads earn their
/// keep.
fn wobble(x: f64) -> f64 {
    (((x + 100.0) * x + 100.0) * x + 100.123).sin()
}

fn main() {
    env_logger::init();

    let intervals = 10_000_000;

    println!("Timing the bag strategy across worker counts");
    println!("{} intervals of the wobble integrand over [-1, 4]", intervals);
    println!();

    let mut baseline = 0.0;
    for workers in [1, 2, 4, 8] {
        let start = Instant::now();
        let estimate = integrate_with(wobble, -1.0, 4.0, intervals, workers).unwrap();
        let seconds = start.elapsed().as_secs_f64();
        if workers == 1 {
            baseline = seconds;
        }

        println!(
            "{:2} workers: {:.6} seconds (speedup {:.2}x, estimate {:.9})",
            workers,
            seconds,
            baseline / seconds,
            estimate
        );
    }
}
